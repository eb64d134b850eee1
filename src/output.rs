//! Rendering of search results for the terminal

use serde::Serialize;

use crate::catalog::CatalogItem;
use crate::error::AppError;
use crate::search::{RelevanceScorer, SearchResult};

/// Wrap every case-insensitive occurrence of a query term in `**bold**`.
///
/// Overlapping and adjacent hits are merged into a single span.
pub fn highlight(text: &str, query: &str) -> String {
    let lower = text.to_lowercase();
    // Lowercasing changed byte offsets; positions would not map back
    if query.trim().is_empty() || lower.len() != text.len() {
        return text.to_string();
    }

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for term in query.split_whitespace() {
        let term = term.to_lowercase();
        let mut from = 0usize;
        while let Some(pos) = lower[from..].find(&term) {
            let start = from + pos;
            let end = start + term.len();
            if text.is_char_boundary(start) && text.is_char_boundary(end) {
                ranges.push((start, end));
            }
            from = end;
        }
    }

    if ranges.is_empty() {
        return text.to_string();
    }

    ranges.sort_by_key(|r| r.0);
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (start, end) in ranges {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }

    let mut out = String::with_capacity(text.len() + merged.len() * 4);
    let mut cursor = 0usize;
    for (start, end) in merged {
        out.push_str(&text[cursor..start]);
        out.push_str("**");
        out.push_str(&text[start..end]);
        out.push_str("**");
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Markdown listing: one section per book, query terms in bold
pub fn format_markdown(result: &SearchResult, query: &str) -> String {
    if let Some(error) = &result.error {
        return format!("# Search failed\n\n{}\n", error);
    }

    let mut md = String::new();
    md.push_str(&format!("# Search Results · {} books\n\n", result.total_count));

    if result.items.is_empty() {
        md.push_str(&format!("No books match \"{}\".\n", query.trim()));
        return md;
    }

    for (rank, item) in result.items.iter().enumerate() {
        md.push_str(&format!("## {}. {}\n\n", rank + 1, highlight(&item.title, query)));
        md.push_str(&format!("{}\n\n", details_line(item, query)));

        if !item.description.is_empty() {
            md.push_str(&format!("> {}\n\n", highlight(&item.description, query)));
        }

        if !item.tags().is_empty() {
            md.push_str(&format!("Tags: {}\n\n", item.tags().join(", ")));
        }

        md.push_str("---\n\n");
    }

    if result.has_more {
        md.push_str("_The catalog has more books than were searched._\n");
    }

    md
}

fn details_line(item: &CatalogItem, query: &str) -> String {
    let mut parts = vec![format!("by {}", highlight(&item.author, query))];
    if !item.category.is_empty() {
        parts.push(item.category.clone());
    }
    parts.push(format!("${:.2}", item.price));
    parts.push(format!("★ {:.1} ({} reviews)", item.rating, item.review_count));
    if let Some(date) = item.published_date {
        parts.push(date.to_string());
    }
    parts.push(if item.in_stock { "in stock" } else { "out of stock" }.to_string());
    parts.join(" · ")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonHit<'a> {
    #[serde(flatten)]
    item: &'a CatalogItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    has_direct_match: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    query: &'a str,
    total_count: usize,
    has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    items: Vec<JsonHit<'a>>,
}

/// Pretty JSON report.
///
/// With a scorer, each item carries the score it was ranked with. Without
/// one (fuzzy matching disabled) the items were never scored and no score
/// fields are emitted.
pub fn format_json(
    result: &SearchResult,
    query: &str,
    scorer: Option<&RelevanceScorer>,
) -> Result<String, AppError> {
    let report = JsonReport {
        query,
        total_count: result.total_count,
        has_more: result.has_more,
        error: result.error.as_deref(),
        items: result
            .items
            .iter()
            .map(|item| {
                let relevance = scorer.map(|s| s.score_str(item, query));
                JsonHit {
                    item,
                    score: relevance.map(|r| r.score),
                    has_direct_match: relevance.map(|r| r.has_direct_match),
                }
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
