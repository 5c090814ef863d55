use anyhow::{Context, Result};
use log::warn;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::model::{ResearcherRecord, ResearcherTable};

pub const SITE_BASE_URL: &str = "https://researchmap.jp/";

/// Listing page of every researcher registered under `institution_code`.
///
/// The site cuts the listing at `limit` entries, so it has to be set above
/// the real head count.
pub fn directory_url(institution_code: &str, limit: u32) -> Result<String> {
    let mut url = Url::parse(SITE_BASE_URL)
        .and_then(|base| base.join("researchers"))
        .context("Failed to build directory URL")?;
    url.query_pairs_mut()
        .append_pair("institution_code", institution_code)
        .append_pair("limit", &limit.to_string());
    Ok(url.to_string())
}

/// Resolve a link taken from the listing against the site root.
///
/// Links that land on another host are not profiles and give `None`.
pub fn profile_url(href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let base = Url::parse(SITE_BASE_URL).ok()?;
    let url = base.join(href).ok()?;
    if url.scheme() != base.scheme() || url.host_str() != base.host_str() {
        return None;
    }
    Some(url.into())
}

/// Parse the researcher cards out of a rendered directory page.
///
/// Kana blocks and name blocks are paired by position. When the page holds
/// more of one than the other the extra blocks are dropped, and a card that
/// lacks one block shifts every pair after it.
pub fn parse_directory(html: &str) -> ResearcherTable {
    let document = Html::parse_document(html);

    let kana_selector = Selector::parse("div.rm-cv-card-kana").unwrap();
    let name_selector = Selector::parse("div.rm-cv-card-name").unwrap();

    let kana_blocks = document.select(&kana_selector);
    let name_blocks = document.select(&name_selector);

    let mut researchers = Vec::new();
    for (kana_el, name_el) in kana_blocks.zip(name_blocks) {
        let kana = element_text(&kana_el);
        let name = element_text(&name_el);

        match card_link(&name_el).and_then(|href| profile_url(&href)) {
            Some(url) => researchers.push(ResearcherRecord::new(name, kana, url)),
            None => warn!("Skipping {}: no researchmap profile link on the card", name),
        }
    }

    ResearcherTable::from(researchers)
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn card_link(name_el: &ElementRef) -> Option<String> {
    let link_selector = Selector::parse("a[href]").unwrap();
    name_el
        .select(&link_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| href.to_string())
}
