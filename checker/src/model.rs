use serde::{Deserialize, Serialize};

/// One researcher from the directory listing, enriched in place with the
/// rendered profile markup and the extracted update date.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ResearcherRecord {
    pub name: String,
    pub kana: String,
    pub profile_url: String,
    /// Rendered profile page. Replaced when the page is fetched again on retry.
    #[serde(default)]
    pub raw_markup: String,
    /// `YYYY/MM/DD` once resolved, empty when no reliable date was found.
    #[serde(default)]
    pub updated_date: String,
}

impl ResearcherRecord {
    pub fn new(name: String, kana: String, profile_url: String) -> Self {
        ResearcherRecord {
            name,
            kana,
            profile_url,
            raw_markup: String::new(),
            updated_date: String::new(),
        }
    }
}

/// Researchers in directory listing order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ResearcherTable {
    pub researchers: Vec<ResearcherRecord>,
}

impl ResearcherTable {
    pub fn len(&self) -> usize {
        self.researchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.researchers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResearcherRecord> {
        self.researchers.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, ResearcherRecord> {
        self.researchers.iter_mut()
    }

    /// Number of researchers left without a date, for the end-of-run report.
    pub fn missing_dates(&self) -> usize {
        self.researchers
            .iter()
            .filter(|r| r.updated_date.is_empty())
            .count()
    }
}

impl From<Vec<ResearcherRecord>> for ResearcherTable {
    fn from(researchers: Vec<ResearcherRecord>) -> Self {
        ResearcherTable { researchers }
    }
}
