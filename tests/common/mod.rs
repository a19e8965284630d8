#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use sosowa::{Config, Error, Fetch, Requester, Result};

pub const MAIN_URL: &str = "http://sosowa.test";

/// Serves canned pages by URL and remembers every URL asked for. Unknown URLs fail like an
/// unreachable host.
#[derive(Default)]
pub struct FakeFetcher {
    pages: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn serve(&self, path: &str, html: impl Into<String>) {
        self.pages
            .lock()
            .unwrap()
            .insert(format!("{MAIN_URL}{path}"), html.into());
    }

    /// Makes `path` unreachable again.
    pub fn take_down(&self, path: &str) {
        self.pages.lock().unwrap().remove(&format!("{MAIN_URL}{path}"));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Fetch for FakeFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        self.calls.lock().unwrap().push(url.to_string());
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Transport {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            })
    }
}

pub fn requester() -> Requester<FakeFetcher> {
    Requester::new(Config::new(MAIN_URL).unwrap(), FakeFetcher::default())
}

/// A requester whose listing index reports `latest` as the last page, already refreshed.
pub fn refreshed_requester(latest: u32) -> Requester<FakeFetcher> {
    let requester = requester();
    requester.fetcher().serve("/sosowa/ssw_l/", index_page(&latest.to_string()));
    requester.refresh_latest_page().unwrap();
    requester
}

fn document(body: &str) -> String {
    format!("<!DOCTYPE html><html><head><title>Sosowa</title></head><body>{body}</body></html>")
}

pub fn index_page(active: &str) -> String {
    document(&format!(
        r#"<ul class="pagination"><li><a href="/sosowa/ssw_l/1">1</a></li><li><a class="active" href="/sosowa/ssw_l/{active}">{active}</a></li></ul>"#
    ))
}

pub fn article_row(id: &str, title: &str) -> String {
    format!(
        r#"<tr id="article{id}">
            <td class="title"><a href="/sosowa/ssw_l/1/{id}">{title}</a></td>
            <td class="name"><a href="/sosowa/ssw_l/search?author={id}">Author {id}</a></td>
            <td class="dateTime"> 2013/05/18 17:42:11 </td>
            <td class="pageCount">1</td>
            <td class="size">12KB</td>
            <td class="evaluationCount">3</td>
            <td class="commentCount">2</td>
            <td class="points">320</td>
            <td class="rate">80.00</td>
        </tr>"#
    )
}

pub fn tag_row(id: &str, tags: &[&str]) -> String {
    let items: String = tags
        .iter()
        .map(|tag| format!(r#"<li><a href="/sosowa/ssw_l/tag/{tag}">{tag}</a></li>"#))
        .collect();
    format!(r#"<tr id="tags{id}"><td colspan="9"><ul>{items}</ul></td></tr>"#)
}

pub fn listing_page(rows: &[String]) -> String {
    document(&format!("<table><tbody>{}</tbody></table>", rows.concat()))
}

pub fn pager(links: &[(&str, &str)]) -> String {
    let items: String = links
        .iter()
        .map(|(label, href)| format!(r#"<li><a href="{href}">{label}</a></li>"#))
        .collect();
    format!(r#"<ul class="pager"><li><span>1</span></li>{items}</ul>"#)
}

/// An article page; `pager` is rendered above the body and again below it.
pub fn article_page(pager: Option<&str>, body: &str, afterword: &str) -> String {
    let pager = pager.unwrap_or_default();
    document(&format!(
        r#"{pager}<div id="contentBody">{body}</div>{pager}<div id="afterwordBody">{afterword}</div>"#
    ))
}
