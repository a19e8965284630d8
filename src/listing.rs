use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;
use tracing::debug;

use crate::parse::{exactly_one, find_in_document, find_in_node, node_text, Document};
use crate::record::{Field, Record, Value};
use crate::request::{listing_page_url, Fetch};
use crate::requester::Requester;
use crate::{info_time, Error, Result};

/// Records of one listing page keyed by id, in row order.
pub type Listing = IndexMap<String, Record>;

const ARTICLE_ROW_SELECTOR: &str = r#"tr[id^="article"]"#;
const TAG_ROW_PREFIX: &str = "tr#tags";

/// Listing cells, one node each, in the order they are read.
const CELLS: [(Field, &str); 9] = [
    (Field::Title, "td.title a"),
    (Field::Author, "td.name a"),
    (Field::UploadDate, "td.dateTime"),
    (Field::PageCount, "td.pageCount"),
    (Field::Size, "td.size"),
    (Field::EvaluationCount, "td.evaluationCount"),
    (Field::CommentCount, "td.commentCount"),
    (Field::Points, "td.points"),
    (Field::Rate, "td.rate"),
];

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new("[0-9]+").expect("valid id pattern"));

impl<F: Fetch> Requester<F> {
    /// Scrapes one listing page into records carrying their listing fields and tags.
    pub fn scrape_page(&self, page_num: u32) -> Result<Listing> {
        self.check_page(page_num)?;

        let document = self.fetch_document(&listing_page_url(self.main_url(), page_num))?;
        let listing = extract_listing(&document, page_num)?;

        info_time!("Page {}: {} records", page_num, listing.len());
        Ok(listing)
    }
}

/// Reads every article row of `document`, then attaches each record's tags.
pub fn extract_listing(document: &Document, page_num: u32) -> Result<Listing> {
    let mut listing = Listing::new();

    for row in find_in_document(document, ARTICLE_ROW_SELECTOR)? {
        let (id, record) = extract_row(row, page_num)?;
        // Duplicate ids keep the later row.
        listing.insert(id, record);
    }

    for (id, record) in listing.iter_mut() {
        let tags = extract_tags(document, id)?;
        record.set_field(Field::Tags, Value::Tags(tags))?;
    }

    Ok(listing)
}

fn extract_row(row: ElementRef<'_>, page_num: u32) -> Result<(String, Record)> {
    let row_id = row
        .value()
        .id()
        .ok_or_else(|| Error::extraction("Article row has no id."))?;
    let id = match DIGITS.find_iter(row_id).collect::<Vec<_>>().as_slice() {
        [digits] => digits.as_str().to_string(),
        _ => {
            return Err(Error::extraction(format!(
                "Article ID scraping failed for row [{row_id}]."
            )))
        }
    };

    let mut record = Record::new();
    record.set_field(Field::PageOfOrigin, Value::Page(page_num))?;
    record.set_field(Field::Id, Value::Text(id.clone()))?;

    for (field, selector) in CELLS {
        let cell = exactly_one(
            find_in_node(row, selector)?,
            &format!("Article {}", field.key()),
        )?;
        record.set_field(field, Value::Text(node_text(cell)))?;
    }

    Ok((id, record))
}

/// Tag labels of the record `id`, in document order. A tag row without list items means no tags.
fn extract_tags(document: &Document, id: &str) -> Result<Vec<String>> {
    let tag_row = exactly_one(
        find_in_document(document, &format!("{TAG_ROW_PREFIX}{id}"))?,
        "Article tag row",
    )?;

    let items = match find_in_node(tag_row, "li") {
        Ok(items) => items,
        Err(Error::ElementNotFound { .. }) => {
            debug!(id, "no tags");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    items
        .into_iter()
        .map(|item| exactly_one(find_in_node(item, "a")?, "Article tag").map(node_text))
        .collect()
}
