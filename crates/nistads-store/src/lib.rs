//! Persistence for collected datasets and the run log

mod io;
mod paths;
mod types;

pub use io::{append_jsonl, atomic_write, read_column_values, read_jsonl, read_table, write_table};
pub use paths::Paths;
pub use types::RunRecord;
