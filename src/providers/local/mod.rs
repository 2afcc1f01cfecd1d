//! Collaborators backed by local files

pub mod bulk_file;
pub mod json_lines;
pub mod synergy_file;

pub use bulk_file::BulkFileCardProvider;
pub use json_lines::JsonLinesSink;
pub use synergy_file::JsonFileSynergyProvider;
