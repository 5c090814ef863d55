pub mod clock;
pub mod directory;
pub mod extract;
pub mod model;
pub mod persist;
pub mod renderer;
pub mod update_check;

#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::clock::{Clock, FixedClock, SystemClock, CANONICAL_DATE_FORMAT};
pub use crate::directory::{directory_url, parse_directory, profile_url, SITE_BASE_URL};
pub use crate::extract::{extract_update_date, modified_text, normalize_update_text, ExtractError};
pub use crate::model::{ResearcherRecord, ResearcherTable};
pub use crate::persist::{
    load_checkpoint, save_checkpoint, save_csv, save_results, ResultPaths, RESULTS_DIR,
};
pub use crate::renderer::{ChromeRenderer, HttpFetcher, PageFetcher};
pub use crate::update_check::{
    normalize_time_only_dates, CheckSummary, Resolution, UpdateChecker, Waits,
};
