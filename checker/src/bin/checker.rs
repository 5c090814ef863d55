use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;
use researchmap_checker::{
    load_checkpoint, save_checkpoint, save_results, ChromeRenderer, Clock, HttpFetcher,
    PageFetcher, ResultPaths, SystemClock, UpdateChecker, Waits, RESULTS_DIR,
};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// How profile pages are turned into markup
#[derive(Debug, Clone, Copy, ValueEnum)]
#[clap(rename_all = "lowercase")]
enum Renderer {
    /// Headless Chrome, runs the page's scripts
    Chrome,
    /// Plain HTTP request, no scripts
    Http,
}

/// Collects the last update date of every researchmap profile of an institution
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Institution code, differs for every school
    #[arg(
        long = "institution_code",
        visible_alias = "institution-code",
        default_value = "6520"
    )]
    institution_code: String,

    /// Directory page size; researchers beyond it are not listed, so set it generously
    #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,

    /// Directory for the checkpoint and CSV
    #[arg(long, default_value = RESULTS_DIR)]
    results_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Renderer::Chrome)]
    renderer: Renderer,

    /// Seconds to let the directory page render
    #[arg(long, default_value_t = 5)]
    directory_wait: u64,

    /// Seconds to let each profile page render
    #[arg(long, default_value_t = 10)]
    profile_wait: u64,

    /// Seconds to let a profile page render when it is fetched a second time
    #[arg(long, default_value_t = 20)]
    retry_wait: u64,

    /// Skip listing and rendering; extract dates from a previously saved checkpoint
    #[arg(long)]
    from_checkpoint: Option<PathBuf>,
}

impl Cli {
    fn waits(&self) -> Waits {
        Waits {
            directory: Duration::from_secs(self.directory_wait),
            profile: Duration::from_secs(self.profile_wait),
            retry: Duration::from_secs(self.retry_wait),
            ..Waits::default()
        }
    }

    fn fetcher(&self) -> Result<Box<dyn PageFetcher>> {
        Ok(match self.renderer {
            Renderer::Chrome => Box::new(ChromeRenderer::new()),
            Renderer::Http => Box::new(HttpFetcher::new()?),
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let clock = SystemClock;
    let fetcher = cli.fetcher()?;
    let checker = UpdateChecker::new(&*fetcher, &clock, cli.waits());

    let paths = ResultPaths::for_date(&cli.results_dir, clock.today());
    fs::create_dir_all(&cli.results_dir).with_context(|| {
        format!(
            "Failed to create results directory: {}",
            cli.results_dir.display()
        )
    })?;

    let mut table = match &cli.from_checkpoint {
        Some(path) => {
            info!("Loading researchers from {}", path.display());
            load_checkpoint(path)?
        }
        None => {
            let mut table = checker.list_researchers(&cli.institution_code, cli.limit)?;
            info!(
                "Rendering {} profiles, this takes roughly {}s",
                table.len(),
                table.len() as u64 * cli.profile_wait
            );
            checker.fetch_profiles(&mut table)?;
            save_checkpoint(&table, &paths.checkpoint)?;
            info!("Rendered pages saved to {}", paths.checkpoint.display());
            table
        }
    };

    let summary = checker.extract_dates(&mut table)?;
    save_results(&table, &paths)?;

    println!(
        "\n{} researchers checked ({} rendered twice, {} without a date)",
        summary.researchers, summary.recovered, summary.missing
    );
    println!("Update dates saved to {}", paths.csv.display());

    Ok(())
}
