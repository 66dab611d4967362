use crate::error::{CrmError, Result};
use crate::models::{CandidateRecord, Submission, TimelineEntry, TIMELINE_MILESTONES};
use crate::parsers::collapse_whitespace;
use crate::urls::{candidate_id_from_url, is_profile_url};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static DATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,2}/\d{1,2}/\d{2,4}\b").unwrap());

/// How far past a milestone label to look for its date token. Dates render
/// in an adjacent cell or span within the same row, so a short window is
/// enough; the window is additionally cut at the next milestone label and
/// at row boundaries so an undated milestone cannot borrow a date from its
/// neighbour or from an unrelated table further down the page.
const DATE_WINDOW: usize = 200;

/// Parses a candidate detail page into a structured record.
///
/// The record id comes from the resolved URL's numeric suffix and is the
/// only load-bearing extraction; everything else degrades to an absent
/// field or a placeholder when the markup does not cooperate.
pub fn parse_candidate_page(html: &str, resolved_url: &str) -> Result<CandidateRecord> {
    let id = candidate_id_from_url(resolved_url).ok_or_else(|| {
        CrmError::Parsing(format!("no numeric candidate id in URL: {resolved_url}"))
    })?;

    let document = Html::parse_document(html);

    let location = labeled_value(&document, "Location").filter(|value| value != "N/A");

    Ok(CandidateRecord {
        id,
        url: resolved_url.trim_end_matches('/').to_string(),
        name: heading_text(&document).unwrap_or_default(),
        current_owner: labeled_value(&document, "Current Owner"),
        sourced_by: labeled_value(&document, "Sourced By"),
        location,
        linkedin_url: first_profile_link(&document),
        timeline: extract_timeline(html),
        submissions: extract_submissions(&document),
    })
}

/// Text of the first heading element, markup stripped.
fn heading_text(document: &Html) -> Option<String> {
    let headings = Selector::parse("h1, h2, h3").unwrap();
    document
        .select(&headings)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|text| !text.is_empty())
}

/// Value of a label-then-value field pair: an element whose own text equals
/// the label, value taken from the next sibling element with non-empty
/// text. Containers that wrap both label and value are skipped naturally,
/// their text never equals the label alone.
fn labeled_value(document: &Html, label: &str) -> Option<String> {
    let candidates = Selector::parse("dt, th, label, b, strong, span, td, div").unwrap();
    for el in document.select(&candidates) {
        let own = collapse_whitespace(&el.text().collect::<String>());
        if own.trim_end_matches(':') != label {
            continue;
        }
        for sibling in el.next_siblings() {
            if let Some(value_el) = ElementRef::wrap(sibling) {
                let text = collapse_whitespace(&value_el.text().collect::<String>());
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }
    None
}

fn first_profile_link(document: &Html) -> Option<String> {
    let anchors = Selector::parse("a[href]").unwrap();
    document
        .select(&anchors)
        .filter_map(|anchor| anchor.value().attr("href"))
        .find(|href| is_profile_url(href))
        .map(str::to_string)
}

/// All six milestones in their fixed order, dated `"N/A"` when the page
/// shows no date for one. Output order is the milestone order, never
/// document order.
fn extract_timeline(html: &str) -> Vec<TimelineEntry> {
    TIMELINE_MILESTONES
        .iter()
        .map(|label| TimelineEntry {
            label: (*label).to_string(),
            date: milestone_date(html, label).unwrap_or_else(|| "N/A".to_string()),
        })
        .collect()
}

/// Scans each occurrence of `label` for a date token within a bounded
/// window after it. The window is truncated at the next milestone label
/// and at the enclosing row's end so tightly packed markup stays
/// unambiguous; occurrences of the label outside the timeline (field
/// labels sharing a prefix, say) simply yield no date and scanning moves
/// on.
fn milestone_date(html: &str, label: &str) -> Option<String> {
    let mut from = 0;
    while let Some(at) = html[from..].find(label) {
        let start = from + at + label.len();
        let mut end = (start + DATE_WINDOW).min(html.len());
        while !html.is_char_boundary(end) {
            end -= 1;
        }
        let mut window = &html[start..end];
        let stops = TIMELINE_MILESTONES
            .iter()
            .copied()
            .filter(|other| *other != label)
            .chain(["</li>", "</tr>"]);
        for stop in stops {
            if let Some(cut) = window.find(stop) {
                window = &window[..cut];
            }
        }
        if let Some(date) = DATE_TOKEN.find(window) {
            return Some(date.as_str().to_string());
        }
        from = start;
    }
    None
}

/// Submission rows from the first table, header skipped. A row needs at
/// least five extractable cells; anything thinner is dropped silently.
fn extract_submissions(document: &Html) -> Vec<Submission> {
    let table_sel = Selector::parse("table").unwrap();
    let row_sel = Selector::parse("tr").unwrap();
    let cell_sel = Selector::parse("td").unwrap();

    let Some(table) = document.select(&table_sel).next() else {
        return Vec::new();
    };

    table
        .select(&row_sel)
        .skip(1)
        .filter_map(|row| {
            let cells: Vec<String> = row
                .select(&cell_sel)
                .map(|cell| collapse_whitespace(&cell.text().collect::<String>()))
                .collect();
            if let [role, company, stage, dates, owner, ..] = cells.as_slice() {
                Some(Submission {
                    role: role.clone(),
                    company: company.clone(),
                    stage: stage.clone(),
                    dates: dates.clone(),
                    owner: owner.clone(),
                })
            } else {
                None
            }
        })
        .collect()
}
