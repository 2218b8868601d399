pub mod json_file;
pub mod traits;

pub use json_file::{JsonFileSource, FAILED_SCRAPE};
pub use traits::ActivitySource;
