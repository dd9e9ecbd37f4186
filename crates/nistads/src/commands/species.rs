use nistads_dataset::extract_species_names;
use nistads_store::Paths;

pub fn run(paths: &Paths) -> anyhow::Result<()> {
    let names = extract_species_names(paths)?;

    if names.is_empty() {
        println!("No species found. Run `nistads collect` first.");
        return Ok(());
    }

    println!("Species ({})", names.len());
    println!("==========");
    for name in &names {
        println!("  {name}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_species_without_datasets() {
        let temp = TempDir::new().unwrap();
        let paths = Paths::with_root(temp.path());
        assert!(run(&paths).is_ok());
    }
}
