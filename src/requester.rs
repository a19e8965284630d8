use std::sync::atomic::{AtomicU32, Ordering};

use tracing::debug;

use crate::config::Config;
use crate::parse::{exactly_one, find_in_document, node_text, Document};
use crate::request::{listing_index_url, Fetch};
use crate::{info_time, Error, Result};

const ACTIVE_PAGE_SELECTOR: &str = "a.active";

/// Entry point to the site: owns the configuration, the injected transport and the
/// current upper bound of the listing page range.
///
/// Listing pages are scraped with [`Requester::scrape_page`], articles are filled in with
/// [`Requester::hydrate`]. The page bound starts unresolved, so
/// [`Requester::refresh_latest_page`] has to succeed once before any page can be scraped.
pub struct Requester<F> {
    config: Config,
    fetcher: F,
    // 0 while unresolved.
    latest_page: AtomicU32,
}

impl<F: Fetch> Requester<F> {
    pub fn new(config: Config, fetcher: F) -> Self {
        Self {
            config,
            fetcher,
            latest_page: AtomicU32::new(0),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn main_url(&self) -> &str {
        &self.config.main_url
    }

    /// The last resolved page bound, if any.
    pub fn latest_page(&self) -> Option<u32> {
        match self.latest_page.load(Ordering::Acquire) {
            0 => None,
            page => Some(page),
        }
    }

    /// Reads the active page indicator off the listing index and stores it as the new
    /// upper bound of valid page numbers. On failure the previous bound is kept.
    pub fn refresh_latest_page(&self) -> Result<u32> {
        let document = self.fetch_document(&listing_index_url(self.main_url()))?;

        let active = exactly_one(
            find_in_document(&document, ACTIVE_PAGE_SELECTOR)?,
            "Active page indicator",
        )?;
        let text = node_text(active);
        let latest = match text.parse::<u32>() {
            Ok(page) if page > 0 => page,
            _ => {
                return Err(Error::extraction(format!(
                    "Active page indicator [{text}] is not a page number."
                )))
            }
        };

        self.latest_page.store(latest, Ordering::Release);
        info_time!("Latest page is {}", latest);
        Ok(latest)
    }

    /// Rejects page numbers outside `[1, latest]` before anything is fetched.
    pub(crate) fn check_page(&self, page_num: u32) -> Result<()> {
        match self.latest_page() {
            Some(latest) if (1..=latest).contains(&page_num) => Ok(()),
            _ => Err(Error::PageOutOfRange(page_num)),
        }
    }

    pub(crate) fn fetch_document(&self, url: &str) -> Result<Document> {
        debug!(url, "fetching");
        let html = self.fetcher.fetch(url)?;
        Ok(Document::parse(html))
    }
}
