use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use crate::model::ResearcherTable;

pub const RESULTS_DIR: &str = "results";

/// Lets spreadsheet software detect the CSV as UTF-8.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const FILE_DATE_FORMAT: &str = "%Y年%m月%d日";

const CSV_HEADER: [&str; 5] = ["", "name", "kana", "url", "updated_date"];

/// Files produced by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPaths {
    /// Full table including page markup, for re-analysis without re-rendering.
    pub checkpoint: PathBuf,
    pub csv: PathBuf,
}

impl ResultPaths {
    pub fn for_date<P: AsRef<Path>>(dir: P, date: NaiveDate) -> Self {
        let stamp = date.format(FILE_DATE_FORMAT).to_string();
        let dir = dir.as_ref();
        ResultPaths {
            checkpoint: dir.join(format!("df_{}.json", stamp)),
            csv: dir.join(format!("ResearchMap_Update_Dates_{}.csv", stamp)),
        }
    }
}

pub fn save_checkpoint<P: AsRef<Path>>(table: &ResearcherTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let json =
        serde_json::to_string_pretty(table).context("Failed to serialize researcher table")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write checkpoint: {}", path.display()))
}

pub fn load_checkpoint<P: AsRef<Path>>(path: P) -> Result<ResearcherTable> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open checkpoint: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse checkpoint: {}", path.display()))
}

/// Write `name, kana, url, updated_date` with a leading row index column.
pub fn save_csv<P: AsRef<Path>>(table: &ResearcherTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(UTF8_BOM)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let mut writer = csv::Writer::from_writer(file);
    writer
        .write_record(CSV_HEADER)
        .context("Failed to write CSV header")?;

    for (idx, record) in table.iter().enumerate() {
        let index = idx.to_string();
        writer
            .write_record([
                index.as_str(),
                record.name.as_str(),
                record.kana.as_str(),
                record.profile_url.as_str(),
                record.updated_date.as_str(),
            ])
            .with_context(|| format!("Failed to write CSV row for {}", record.name))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))
}

/// Write the checkpoint and the CSV, creating their directories as needed.
pub fn save_results(table: &ResearcherTable, paths: &ResultPaths) -> Result<()> {
    for path in [&paths.checkpoint, &paths.csv] {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
    }

    save_checkpoint(table, &paths.checkpoint)?;
    save_csv(table, &paths.csv)
}
