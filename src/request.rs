use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::Config;
use crate::Result;

const LISTING_PATH: &str = "/sosowa/ssw_l/";

/// Blocking transport used by the scraper. Implementations return the raw markup at `url`.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// `Fetch` over a blocking `reqwest` client. Non-success statuses become transport errors.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    // Client uses Arc so we can clone cheaply
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().timeout(Duration::from_secs(config.timeout_secs));
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Fetch for HttpFetcher {
    /// Requests a page and returns a `Result<String>` containing the HTML.
    fn fetch(&self, url: &str) -> Result<String> {
        let res = self.client.get(url).send()?.error_for_status()?;
        let html = res.text()?;
        Ok(html)
    }
}

pub(crate) fn listing_index_url(main_url: &str) -> String {
    format!("{main_url}{LISTING_PATH}")
}

pub(crate) fn listing_page_url(main_url: &str, page_num: u32) -> String {
    format!("{main_url}{LISTING_PATH}{page_num}")
}

pub(crate) fn article_url(main_url: &str, page_num: u32, id: &str) -> String {
    format!("{main_url}{LISTING_PATH}{page_num}/{id}")
}

/// Sub-page links on article pages are site-relative.
pub(crate) fn subpage_url(main_url: &str, href: &str) -> String {
    format!("{main_url}{href}")
}
