use anyhow::{Context, Result};
use env_logger::Env;
use researchmap_checker::{
    extract_update_date, modified_text, ChromeRenderer, Clock, PageFetcher, SystemClock, Waits,
};
use scraper::Html;
use std::env;
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Please provide a profile URL and a test name");
        eprintln!("Usage: cargo run --bin save_profile_page <URL> <test_name>");
        std::process::exit(1);
    }

    let url = &args[1];
    let test_name = &args[2];

    println!("Rendering {}...", url);

    let html = ChromeRenderer::new().fetch(url, Waits::default().profile)?;

    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir).context("Failed to create failures directory")?;

    let file_path = failures_dir.join(format!("{}.html", test_name));
    fs::write(&file_path, &html).context("Failed to write HTML file")?;

    println!(
        "Saved HTML to {} for regression testing",
        file_path.display()
    );

    let document = Html::parse_document(&html);
    let marker = modified_text(&document);

    println!("\nHTML analysis results:");
    println!("  - Markup size: {} bytes", html.len());
    println!("  - Has update marker: {}", marker.is_some());
    if let Some(text) = &marker {
        println!("  - Marker text: {:?}", text.trim());
    }

    match extract_update_date(&html, SystemClock.today()) {
        Ok(date) if date.is_empty() => {
            println!("Extraction found no date; the page may not have finished rendering");
        }
        Ok(date) => println!("Extraction succeeded: {}", date),
        Err(e) => println!("Extraction failed with error: {}", e),
    }

    Ok(())
}
