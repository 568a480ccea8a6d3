pub mod files;

pub use files::{find_all_screenplay_files, find_screenplay_file};
