//! Git-like operations: cat-file, hash-object, log

mod history;
mod plumbing;

pub use history::{log, walk, LogEntry};
pub use plumbing::{cat_file, hash_object};
