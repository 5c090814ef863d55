use anyhow::{Context, Result};
use log::{info, warn};
use std::thread;
use std::time::Duration;

use crate::clock::Clock;
use crate::directory::{directory_url, parse_directory};
use crate::extract::{extract_update_date, is_time_only};
use crate::model::{ResearcherRecord, ResearcherTable};
use crate::renderer::PageFetcher;

/// Render waits for each kind of page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waits {
    pub directory: Duration,
    pub profile: Duration,
    /// Used when a profile is rendered a second time; heavy pages need longer.
    pub retry: Duration,
    /// Pause between two profile fetches.
    pub between_profiles: Duration,
}

impl Default for Waits {
    fn default() -> Self {
        Waits {
            directory: Duration::from_secs(5),
            profile: Duration::from_secs(10),
            retry: Duration::from_secs(20),
            between_profiles: Duration::from_millis(100),
        }
    }
}

impl Waits {
    /// No waiting at all, for fetchers that do not render.
    pub fn none() -> Self {
        Waits {
            directory: Duration::ZERO,
            profile: Duration::ZERO,
            retry: Duration::ZERO,
            between_profiles: Duration::ZERO,
        }
    }
}

/// How a researcher's final date was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The first render was readable.
    Extracted,
    /// The first render was broken and the page was rendered again.
    Recovered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckSummary {
    pub researchers: usize,
    pub recovered: usize,
    pub missing: usize,
}

/// Walks an institution's researchers one at a time: list, render, extract.
pub struct UpdateChecker<'a> {
    fetcher: &'a dyn PageFetcher,
    clock: &'a dyn Clock,
    waits: Waits,
}

impl<'a> UpdateChecker<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, clock: &'a dyn Clock, waits: Waits) -> Self {
        UpdateChecker {
            fetcher,
            clock,
            waits,
        }
    }

    /// List, render and date every researcher of the institution.
    pub fn run(
        &self,
        institution_code: &str,
        limit: u32,
    ) -> Result<(ResearcherTable, CheckSummary)> {
        let mut table = self.list_researchers(institution_code, limit)?;
        self.fetch_profiles(&mut table)?;
        let summary = self.extract_dates(&mut table)?;
        Ok((table, summary))
    }

    pub fn list_researchers(&self, institution_code: &str, limit: u32) -> Result<ResearcherTable> {
        let url = directory_url(institution_code, limit)?;
        info!("Navigating to {}...", url);

        let html = self
            .fetcher
            .fetch(&url, self.waits.directory)
            .context("Failed to render the researcher directory")?;
        let table = parse_directory(&html);

        info!("Found {} researchers", table.len());
        if table.len() >= limit as usize {
            warn!(
                "Directory returned {} entries, as many as the limit; some may be missing",
                table.len()
            );
        }
        Ok(table)
    }

    /// Render every profile page and keep its markup on the record.
    pub fn fetch_profiles(&self, table: &mut ResearcherTable) -> Result<()> {
        let total = table.len();
        for (idx, record) in table.iter_mut().enumerate() {
            if idx > 0 {
                thread::sleep(self.waits.between_profiles);
            }
            info!("[{}/{}] loading {}", idx + 1, total, record.name);
            record.raw_markup = self
                .fetcher
                .fetch(&record.profile_url, self.waits.profile)
                .with_context(|| format!("Failed to render profile of {}", record.name))?;
        }
        Ok(())
    }

    /// Fill in `updated_date` for every record from its stored markup.
    ///
    /// A record whose markup cannot be read gets exactly one more render. If
    /// that one cannot be read either the whole pass fails.
    pub fn extract_dates(&self, table: &mut ResearcherTable) -> Result<CheckSummary> {
        let total = table.len();
        let mut recovered = 0;

        for (idx, record) in table.iter_mut().enumerate() {
            if self.resolve_date(record)? == Resolution::Recovered {
                recovered += 1;
            }
            info!(
                "[{}/{}] {}: {}",
                idx + 1,
                total,
                record.name,
                if record.updated_date.is_empty() {
                    "no update date"
                } else {
                    record.updated_date.as_str()
                }
            );
        }

        normalize_time_only_dates(table, &self.clock.today_canonical());

        Ok(CheckSummary {
            researchers: total,
            recovered,
            missing: table.missing_dates(),
        })
    }

    /// Extract one researcher's date, rendering the page again if needed.
    pub fn resolve_date(&self, record: &mut ResearcherRecord) -> Result<Resolution> {
        let today = self.clock.today();

        let failure = match extract_update_date(&record.raw_markup, today) {
            Ok(date) => {
                record.updated_date = date;
                return Ok(Resolution::Extracted);
            }
            Err(e) => e,
        };

        warn!("error occurred for {}: {}; rendering again", record.name, failure);
        record.raw_markup = self
            .fetcher
            .fetch(&record.profile_url, self.waits.retry)
            .with_context(|| format!("Failed to re-render profile of {}", record.name))?;

        let date = extract_update_date(&record.raw_markup, today).with_context(|| {
            format!(
                "Failed to extract update date of {} after rendering it again",
                record.name
            )
        })?;
        info!("{:?} is extracted from {}", date, record.profile_url);
        record.updated_date = date;
        Ok(Resolution::Recovered)
    }
}

/// Replace any date still stored as a bare time of day with `today`.
pub fn normalize_time_only_dates(table: &mut ResearcherTable, today: &str) {
    for record in table.iter_mut() {
        if is_time_only(&record.updated_date) {
            record.updated_date = today.to_string();
        }
    }
}
