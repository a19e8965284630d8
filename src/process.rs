use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

use chrono::Local;
use tokio::{
    sync::mpsc,
    task::{spawn_blocking, JoinSet},
};

use crate::listing::Listing;
use crate::record::Record;
use crate::request::Fetch;
use crate::requester::Requester;
use crate::{info_time, Result, PAGES_PER_BLOCK};

/// What a run covers. Page bounds left as `None` default to the first and the latest page.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub first_page: Option<u32>,
    pub last_page: Option<u32>,
    pub hydrate: bool,
}

/// Resolves the page range, scrapes the listing pages and optionally hydrates every record.
/// Returns the records in page order, each page in row order. The first failure aborts the run.
pub async fn process_site<F: Fetch + 'static>(
    requester: Arc<Requester<F>>,
    opts: RunOptions,
) -> Result<Vec<Record>> {
    let start_time = Local::now();
    info_time!("Started scraping");

    let latest = spawn_blocking({
        let requester = requester.clone();
        move || requester.refresh_latest_page()
    })
    .await??;

    let Some(page_range) = clamp_range(&opts, latest) else {
        info_time!("Nothing to scrape within pages 1..={}", latest);
        return Ok(Vec::new());
    };

    let (listing_tx, listing_rx) = mpsc::channel(PAGES_PER_BLOCK);
    let collect_handle = tokio::spawn(async move { collect_listings(listing_rx).await });

    process_blocks(requester.clone(), page_range, listing_tx).await?;
    let records: Vec<Record> = collect_handle
        .await?
        .into_values()
        .flat_map(|listing| listing.into_values())
        .collect();
    info_time!(start_time, "Finished listing {} records.", records.len());

    if !opts.hydrate {
        return Ok(records);
    }
    let records = hydrate_all(requester, records).await?;
    info_time!(start_time, "Finished hydrating {} records.", records.len());
    Ok(records)
}

/// Intersects the requested pages with `[1, latest]`. `None` when nothing is left.
fn clamp_range(opts: &RunOptions, latest: u32) -> Option<RangeInclusive<u32>> {
    let first = opts.first_page.unwrap_or(1).max(1);
    let last = opts.last_page.unwrap_or(latest).min(latest);
    (first <= last).then_some(first..=last)
}

/// Scrapes the range a block of pages at a time, sending each finished page down `listing_tx`.
async fn process_blocks<F: Fetch + 'static>(
    requester: Arc<Requester<F>>,
    page_range: RangeInclusive<u32>,
    listing_tx: mpsc::Sender<(u32, Listing)>,
) -> Result<()> {
    let pages: Vec<u32> = page_range.collect();
    for block in pages.chunks(PAGES_PER_BLOCK) {
        let start_block_time = Local::now();

        let mut task_set = JoinSet::new();
        for &page_num in block {
            // Requester is behind an Arc so we can clone cheaply
            let requester = requester.clone();
            task_set.spawn_blocking(move || requester.scrape_page(page_num).map(|l| (page_num, l)));
        }

        while let Some(task) = task_set.join_next().await {
            let page = task??;
            listing_tx.send(page).await?;
        }
        info_time!(start_block_time, "Processed pages {:?}", block);
    }
    Ok(())
}

/// Collects the scraped pages, keyed by page number so they come back in order.
async fn collect_listings(mut listing_rx: mpsc::Receiver<(u32, Listing)>) -> BTreeMap<u32, Listing> {
    let mut listings = BTreeMap::new();
    while let Some((page_num, listing)) = listing_rx.recv().await {
        listings.insert(page_num, listing);
    }
    listings
}

/// Hydrates every record on its own blocking task. Each record is moved into exactly one
/// task, so there is a single writer per record.
async fn hydrate_all<F: Fetch + 'static>(
    requester: Arc<Requester<F>>,
    records: Vec<Record>,
) -> Result<Vec<Record>> {
    let total = records.len();
    let mut hydrated: Vec<Option<Record>> = vec![None; total];

    let mut records = records.into_iter().enumerate().peekable();
    while records.peek().is_some() {
        let mut task_set = JoinSet::new();
        for (idx, mut record) in records.by_ref().take(PAGES_PER_BLOCK) {
            let requester = requester.clone();
            task_set.spawn_blocking(move || requester.hydrate(&mut record).map(|_| (idx, record)));
        }
        while let Some(task) = task_set.join_next().await {
            let (idx, record) = task??;
            hydrated[idx] = Some(record);
        }
    }

    Ok(hydrated.into_iter().flatten().collect())
}
