use anyhow::{Context, Result};
use env_logger::Env;
use researchmap_checker::{ChromeRenderer, SystemClock, UpdateChecker, Waits};
use std::fs;

const DEFAULT_LIMIT: u32 = 200;

fn list_researchers(institution_code: &str, limit: u32) -> Result<()> {
    let renderer = ChromeRenderer::new();
    let clock = SystemClock;
    let checker = UpdateChecker::new(&renderer, &clock, Waits::default());

    let table = checker.list_researchers(institution_code, limit)?;

    println!(
        "Found {} researchers for institution {} (limit {})",
        table.len(),
        institution_code,
        limit
    );

    if table.is_empty() {
        println!("No researchers found; check the institution code");
        return Ok(());
    }

    println!("\nResearchers:");
    for (index, researcher) in table.iter().enumerate() {
        println!("{}. {} ({})", index + 1, researcher.name, researcher.kana);
        println!("   URL: {}", researcher.profile_url);
    }

    if table.len() >= limit as usize {
        println!("\nThe listing is as long as the limit; rerun with a larger limit");
    }

    let output_file_name = format!("listing_{}.json", institution_code);
    let json = serde_json::to_string_pretty(&table)
        .context("Failed to serialize researcher listing")?;
    fs::write(&output_file_name, json).context("Failed to write JSON file")?;

    println!("\nListing saved to {}", output_file_name);

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Please provide an institution code as an argument");
        eprintln!("Usage: cargo run --bin list_researchers <INSTITUTION_CODE> [LIMIT]");
        eprintln!("Example: cargo run --bin list_researchers 6520 300");
        std::process::exit(1);
    }

    let institution_code = &args[1];
    let limit = match args.get(2) {
        Some(l) => match l.parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => {
                eprintln!("Limit must be a positive number");
                std::process::exit(1);
            }
        },
        None => DEFAULT_LIMIT,
    };

    list_researchers(institution_code, limit)
}
