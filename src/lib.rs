//! Scraper for the Sosowa listing: paginated listing pages become [`Record`]s with their
//! tags, and each record can then be hydrated with the full text of its article.
//!
//! Everything below [`process`] is synchronous. [`Requester`] takes an injected [`Fetch`]
//! transport, so tests can serve fixture pages.

mod error;
mod macros;

pub mod article;
pub mod config;
pub mod listing;
pub mod parse;
pub mod process;
pub mod record;
pub mod request;
pub mod requester;

pub use article::PageRef;
pub use config::Config;
pub use error::{Error, Result};
pub use listing::Listing;
pub use record::{Field, Record, Value};
pub use request::{Fetch, HttpFetcher};
pub use requester::Requester;

/// Listing pages, and later articles, scraped concurrently per block.
const PAGES_PER_BLOCK: usize = 8;
