use crate::urls::{is_profile_url, normalize_profile_url};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static DETAIL_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/candidates/\d+/?$").unwrap());

/// Scans a search-results listing for the row whose profile link matches
/// `target_url`, returning that row's candidate detail path.
///
/// Markup assumption: results render as the first `<table>` on the page,
/// one candidate per row after the header row, with the profile link and
/// the detail link as anchors somewhere in the row's cells. Comparison is
/// on normalized URLs, so scheme, `www.`, case and trailing-slash
/// differences between the CRM's stored link and the viewed profile do not
/// break the match. The first matching row in document order wins.
pub fn find_matching_row(html: &str, target_url: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table").unwrap();
    let row_sel = Selector::parse("tr").unwrap();
    let anchor_sel = Selector::parse("a[href]").unwrap();

    let target = normalize_profile_url(target_url);
    let table = document.select(&table_sel).next()?;

    for row in table.select(&row_sel).skip(1) {
        let matched = row
            .select(&anchor_sel)
            .filter_map(|anchor| anchor.value().attr("href"))
            .filter(|href| is_profile_url(href))
            .any(|href| normalize_profile_url(href) == target);
        if matched {
            return row
                .select(&anchor_sel)
                .filter_map(|anchor| anchor.value().attr("href"))
                .find(|href| DETAIL_HREF.is_match(href))
                .map(str::to_string);
        }
    }
    None
}
