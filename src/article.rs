use tracing::debug;

use crate::parse::{exactly_one, find_in_document, find_in_node, node_text, normalized_inner, Document};
use crate::record::{Field, Record, Value};
use crate::request::{article_url, subpage_url, Fetch};
use crate::requester::Requester;
use crate::{Error, Result};

const PAGER_SELECTOR: &str = "ul.pager";
const CONTENT_SELECTOR: &str = "div#contentBody";
const AFTERWORD_SELECTOR: &str = "div#afterwordBody";
/// Stored when an article has an empty afterword.
const NO_AFTERWORD: &str = "None";

/// One entry of an article's page list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRef {
    /// The document already in hand.
    Current,
    /// A site-relative link to another page of the article.
    Link(String),
}

impl<F: Fetch> Requester<F> {
    /// Fetches every page of the article `record` points at and fills in its content and
    /// afterword. On failure the record keeps whatever was set before. A record that already
    /// has content is rejected without fetching.
    pub fn hydrate(&self, record: &mut Record) -> Result<()> {
        if record.content().is_some() || record.afterword().is_some() {
            return Err(Error::extraction(format!(
                "Record [{}] is already hydrated.",
                record.id().unwrap_or_default()
            )));
        }
        let page_num = record
            .page_of_origin()
            .ok_or_else(|| Error::extraction("Record has no page of origin."))?;
        let id = record
            .id()
            .ok_or_else(|| Error::extraction("Record has no id."))?;

        let mut document = self.fetch_document(&article_url(self.main_url(), page_num, id))?;
        let pages = page_list(&document)?;

        let mut content = String::new();
        for (i, page) in pages.iter().enumerate() {
            content.push_str(&format!("[PAGE:{i}]\n"));
            if let PageRef::Link(href) = page {
                document = self.fetch_document(&subpage_url(self.main_url(), href))?;
            }

            let body = exactly_one(
                find_in_document(&document, CONTENT_SELECTOR)?,
                "Article contentBody",
            )?;
            if let Some(text) = normalized_inner(body) {
                content.push_str(&text);
            }
        }
        record.set_field(Field::Content, Value::Text(content))?;

        // The afterword sits on the last page fetched.
        let afterword = exactly_one(
            find_in_document(&document, AFTERWORD_SELECTOR)?,
            "Article afterwordBody",
        )?;
        let afterword = normalized_inner(afterword).unwrap_or_else(|| NO_AFTERWORD.to_string());
        record.set_field(Field::Afterword, Value::Text(afterword))?;

        debug!(id = record.id(), pages = pages.len(), "hydrated");
        Ok(())
    }
}

/// Builds the page list of an article: the current document first, then every numbered
/// pager link. An article without a pager, or with a pager holding no links, is single-page.
pub fn page_list(document: &Document) -> Result<Vec<PageRef>> {
    let mut pages = vec![PageRef::Current];

    let pagers = match find_in_document(document, PAGER_SELECTOR) {
        Ok(pagers) => pagers,
        Err(Error::ElementNotFound { .. }) => {
            debug!("no pager, single page article");
            return Ok(pages);
        }
        Err(e) => return Err(e),
    };
    let [top, _bottom] = pagers.as_slice() else {
        return Err(Error::extraction(format!(
            "Article pager: expected 2 pagers, found {}.",
            pagers.len()
        )));
    };

    let links = match find_in_node(*top, "a") {
        Ok(links) => links,
        Err(Error::ElementNotFound { .. }) => {
            debug!("empty pager, single page article");
            return Ok(pages);
        }
        Err(e) => return Err(e),
    };
    for link in links {
        let label = node_text(link);
        if label.is_empty() || !label.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        let href = link
            .value()
            .attr("href")
            .ok_or_else(|| Error::extraction(format!("Pager link [{label}] has no href.")))?;
        pages.push(PageRef::Link(href.to_string()));
    }

    Ok(pages)
}
