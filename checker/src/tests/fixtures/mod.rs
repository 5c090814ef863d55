use std::fs;
use std::path::Path;

/// Load test HTML fixture by name
pub fn load_html_fixture(fixture_name: &str) -> String {
    let path = Path::new("src/tests/fixtures").join(format!("{}.html", fixture_name));
    fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("Failed to load test fixture: {}", fixture_name))
}

/// Load a saved profile page that once failed to yield a date
pub fn load_failure_html(failure_name: &str) -> Option<String> {
    let path = Path::new("src/tests/fixtures/failures").join(format!("{}.html", failure_name));
    fs::read_to_string(path).ok()
}

/// A directory page with one card per `(kana, name, href)`.
pub fn directory_page(cards: &[(&str, &str, &str)]) -> String {
    let cards: String = cards
        .iter()
        .map(|(kana, name, href)| {
            format!(
                r#"<div class="rm-cv-card">
  <div class="rm-cv-card-kana">{}</div>
  <div class="rm-cv-card-name"><a href="{}">{}</a></div>
</div>
"#,
                kana, href, name
            )
        })
        .collect();
    format!("<html><body>{}</body></html>", cards)
}

/// A profile page whose update box holds `marker_text`.
pub fn profile_page(marker_text: &str) -> String {
    format!(
        r#"<html><body><h1>Researcher</h1><div class="rm-modified text-right">{}</div></body></html>"#,
        marker_text
    )
}
