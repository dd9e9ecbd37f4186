use nistads_store::{read_jsonl, Paths, RunRecord};

const RECENT_LIMIT: usize = 20;

fn compute_stats(runs: &[RunRecord]) -> String {
    if runs.is_empty() {
        return "No runs to analyze.".to_string();
    }
    let total = runs.len();
    let avg_duration = runs.iter().map(RunRecord::duration_secs).sum::<f64>() / total as f64;
    let experiments: usize = runs.iter().map(|r| r.experiments_fetched).sum();
    let single: usize = runs.iter().map(|r| r.single_component_rows).sum();
    let binary: usize = runs.iter().map(|r| r.binary_mixture_rows).sum();
    let malformed: usize = runs.iter().map(|r| r.malformed_experiments).sum();

    format!(
        "Total runs: {}\n\
         Avg duration: {:.1}s\n\
         Experiments fetched: {}\n\
         Single-component rows: {}\n\
         Binary-mixture rows: {}\n\
         Malformed experiments: {}",
        total, avg_duration, experiments, single, binary, malformed
    )
}

fn recent(runs: &[RunRecord], limit: usize) -> Vec<&RunRecord> {
    runs.iter().rev().take(limit).collect()
}

pub fn run(paths: &Paths, stats: bool) -> anyhow::Result<()> {
    let runs: Vec<RunRecord> = read_jsonl(&paths.runs_file())?;

    if runs.is_empty() {
        println!("No run history");
        return Ok(());
    }

    if stats {
        println!("{}", compute_stats(&runs));
        return Ok(());
    }

    let display_runs = recent(&runs, RECENT_LIMIT);

    println!("Recent Runs (last {})", display_runs.len());
    println!("=====================");
    for run in &display_runs {
        println!(
            "  {} | {:.0}s guests:{} hosts:{} experiments:{} sc:{} bm:{}",
            run.started_at.format("%Y-%m-%d %H:%M"),
            run.duration_secs(),
            run.guests_fetched,
            run.hosts_fetched,
            run.experiments_fetched,
            run.single_component_rows,
            run.binary_mixture_rows,
        );
    }
    Ok(())
}
