use anyhow::{anyhow, Context, Result};
use headless_chrome::{Browser, LaunchOptions};
use log::debug;
use reqwest::blocking::Client;
use std::ffi::OsStr;
use std::thread;
use std::time::{Duration, Instant};

/// How long to keep polling for the page skeleton once the fixed wait is over.
const MARKER_TIMEOUT: Duration = Duration::from_secs(10);

/// Element that has to exist before the markup is worth reading.
const STRUCTURAL_MARKER: &str = "body";

/// Something that turns a URL into page markup.
///
/// `wait` is how long client-side rendering is given before the markup is
/// read. Implementations do not retry; a transport failure is returned as is.
pub trait PageFetcher {
    fn fetch(&self, url: &str, wait: Duration) -> Result<String>;
}

/// Renders pages in headless Chrome, one browser process per call.
///
/// A fresh process means no cookies or tabs leak from one researcher to the
/// next. The browser is dropped (and its process killed) on every exit path.
#[derive(Debug, Clone)]
pub struct ChromeRenderer {
    marker_timeout: Duration,
}

impl Default for ChromeRenderer {
    fn default() -> Self {
        ChromeRenderer {
            marker_timeout: MARKER_TIMEOUT,
        }
    }
}

impl ChromeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn launch(&self, wait: Duration) -> Result<Browser> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            // The browser must outlive the fixed wait plus the marker poll.
            .idle_browser_timeout(wait + self.marker_timeout + Duration::from_secs(30))
            .args(vec![OsStr::new("--disable-dev-shm-usage")])
            .build()
            .map_err(|e| anyhow!("Invalid browser launch options: {}", e))?;

        Browser::new(options).context("Failed to launch headless Chrome")
    }
}

impl PageFetcher for ChromeRenderer {
    fn fetch(&self, url: &str, wait: Duration) -> Result<String> {
        let started = Instant::now();
        let browser = self.launch(wait)?;
        let tab = browser.new_tab().context("Failed to open browser tab")?;

        tab.navigate_to(url)
            .with_context(|| format!("Failed to navigate to {}", url))?;

        thread::sleep(wait);

        // A missing marker is not fatal; whatever has rendered so far is returned.
        if let Err(e) =
            tab.wait_for_element_with_custom_timeout(STRUCTURAL_MARKER, self.marker_timeout)
        {
            debug!("{} never showed <{}>: {}", url, STRUCTURAL_MARKER, e);
        }

        let html = tab
            .get_content()
            .with_context(|| format!("Failed to read rendered markup of {}", url))?;

        debug!(
            "rendered {} ({} bytes) in {:.1}s",
            url,
            html.len(),
            started.elapsed().as_secs_f64()
        );
        Ok(html)
    }
}

/// Plain HTTP GET without script execution. The wait hint is ignored.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("researchmap-checker/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpFetcher { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str, _wait: Duration) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to send request to {}", url))?
            .error_for_status()
            .with_context(|| format!("Server rejected request to {}", url))?;
        response.text().context("Failed to get response text")
    }
}
