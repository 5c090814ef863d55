use chrono::{Datelike, NaiveDate};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use thiserror::Error;

use crate::clock::CANONICAL_DATE_FORMAT;

/// Markup variants of the "last modified" box, newest first.
///
/// Current pages carry two classes (`rm-modified text-right`) that can appear
/// in any order; older pages used a single hyphenated class.
const MODIFIED_SELECTORS: [&str; 2] = ["div.rm-modified.text-right", "div.rm-modified-text-right"];

/// The page could not be read; fetching it again may help.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("page markup is empty")]
    EmptyMarkup,
}

/// Shapes the site uses to print the modification date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateShape {
    /// `HH:MM`, printed when the page changed today.
    TimeOfDay,
    /// `MM/DD`, printed for dates in the current year.
    MonthDay,
    /// `YYYY/MM/DD`.
    Full,
    Unknown,
}

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn update_label() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(?:更新日|last\s*updated|updated)\s*[:：]\s*").unwrap())
}

fn time_of_day() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{1,2}:[0-9]{1,2}$").unwrap())
}

fn month_day() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{1,2}/[0-9]{1,2}$").unwrap())
}

fn full_date() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{4}/[0-9]{1,2}/[0-9]{1,2}$").unwrap())
}

/// Find the update date of a rendered profile page.
///
/// Returns the date as `YYYY/MM/DD` (month and day keep the padding the page
/// used), or an empty string when the page has no marker or prints something
/// that is not a date. `Err` means the render came back blank, which is the
/// signal to render the page again.
pub fn extract_update_date(html: &str, today: NaiveDate) -> Result<String, ExtractError> {
    if html.trim().is_empty() {
        return Err(ExtractError::EmptyMarkup);
    }

    let document = Html::parse_document(html);
    match modified_text(&document) {
        Some(text) => Ok(normalize_update_text(&text, today)),
        None => Ok(String::new()),
    }
}

/// Raw text of the first "last modified" box on the page, if any.
pub fn modified_text(document: &Html) -> Option<String> {
    MODIFIED_SELECTORS.iter().find_map(|css| {
        let selector = Selector::parse(css).unwrap();
        document
            .select(&selector)
            .next()
            .map(|element| element.text().collect::<Vec<_>>().join(" "))
    })
}

/// Turn the text of the marker box into a canonical date.
///
/// The numbers are taken as printed; a shape that matches is never rejected.
pub fn normalize_update_text(text: &str, today: NaiveDate) -> String {
    let collapsed = whitespace_run().replace_all(text, " ");
    let unlabeled = update_label().replace_all(collapsed.trim(), "");
    let token: String = unlabeled.chars().filter(|c| !c.is_whitespace()).collect();

    match classify(&token) {
        DateShape::TimeOfDay => today.format(CANONICAL_DATE_FORMAT).to_string(),
        DateShape::MonthDay => format!("{}/{}", today.year(), token),
        DateShape::Full => token,
        DateShape::Unknown => String::new(),
    }
}

fn classify(token: &str) -> DateShape {
    if time_of_day().is_match(token) {
        DateShape::TimeOfDay
    } else if month_day().is_match(token) {
        DateShape::MonthDay
    } else if full_date().is_match(token) {
        DateShape::Full
    } else {
        DateShape::Unknown
    }
}

/// True when a stored value is still a bare time of day rather than a date.
pub fn is_time_only(value: &str) -> bool {
    value.contains(':')
}
