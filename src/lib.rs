pub mod args;
pub mod counter;
pub mod database;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod input;
pub mod stats;
pub mod utils;

pub use args::{Column, CountArgs, ExtractArgs, SuffixOptions};
pub use database::SuffixDatabase;
pub use domain::{extract, Extraction};
pub use error::ToolError;
pub use stats::SuffixTally;
