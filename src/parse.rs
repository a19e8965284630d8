use scraper::{ElementRef, Html, Selector};

use crate::{Error, Result};

/// Site markup for a line break inside body sections.
const LINE_BREAK: &str = "<br>";

/// A fetched page: the raw source kept alongside its parsed tree so lookups that come up
/// empty can report what they searched.
pub struct Document {
    source: String,
    html: Html,
}

impl Document {
    pub fn parse(source: String) -> Self {
        let html = Html::parse_document(&source);
        Self { source, html }
    }
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::InvalidSelector(sel_str.into()))
}

/// Runs `selector` over the whole document. An empty match is an error carrying the document text.
pub fn find_in_document<'a>(document: &'a Document, selector: &str) -> Result<Vec<ElementRef<'a>>> {
    let found: Vec<_> = document.html.select(&create_selector(selector)?).collect();
    if found.is_empty() {
        return Err(Error::ElementNotFound {
            selector: selector.to_string(),
            document: Some(document.source.clone()),
        });
    }
    Ok(found)
}

/// Runs `selector` over the subtree below `node`. An empty match is an error.
pub fn find_in_node<'a>(node: ElementRef<'a>, selector: &str) -> Result<Vec<ElementRef<'a>>> {
    let found: Vec<_> = node.select(&create_selector(selector)?).collect();
    if found.is_empty() {
        return Err(Error::ElementNotFound {
            selector: selector.to_string(),
            document: None,
        });
    }
    Ok(found)
}

/// Unwraps a match list that has to hold exactly one node, naming `what` otherwise.
pub fn exactly_one<'a>(found: Vec<ElementRef<'a>>, what: &str) -> Result<ElementRef<'a>> {
    match found.as_slice() {
        [node] => Ok(*node),
        _ => Err(Error::extraction(format!(
            "{what}: expected exactly one element, found {}.",
            found.len()
        ))),
    }
}

#[inline]
pub fn node_text(node: ElementRef<'_>) -> String {
    node.text().collect::<String>().trim().to_string()
}

/// Inner markup of `node` with line-break tags turned into newlines. `None` when the node is empty.
pub fn normalized_inner(node: ElementRef<'_>) -> Option<String> {
    let inner = node.inner_html();
    if inner.is_empty() {
        return None;
    }
    Some(inner.replace(LINE_BREAK, "\n"))
}
