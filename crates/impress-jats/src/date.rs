//! Publication date resolution
//!
//! JATS articles may carry several `pub-date` nodes (print, electronic,
//! collection...). The electronic/online one is preferred; without it the
//! last node scanned is used.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use lazy_static::lazy_static;

use crate::document::{Element, JatsDocument};
use crate::error::ExtractError;

const PUB_DATES: &str = "front/article-meta/pub-date";

lazy_static! {
    /// English month names and abbreviations seen in `<month>`
    static ref MONTHS: HashMap<&'static str, u32> = {
        let names = [
            ("january", 1), ("february", 2), ("march", 3), ("april", 4),
            ("may", 5), ("june", 6), ("july", 7), ("august", 8),
            ("september", 9), ("october", 10), ("november", 11), ("december", 12),
        ];
        let mut m = HashMap::new();
        for (name, number) in names {
            m.insert(name, number);
            m.insert(&name[..3], number);
        }
        m.insert("sept", 9);
        m
    };
}

/// True for `pub-type="given-online-pub"` or `publication-format="electronic"`
pub fn is_online_pub_date(node: &Element) -> bool {
    node.attribute("pub-type") == Some("given-online-pub")
        || node.attribute("publication-format") == Some("electronic")
}

/// The `pub-date` node the publication date is read from.
///
/// Scans in document order and stops at the first online/electronic node.
/// When there is none, the last node visited is returned, not the first.
pub fn select_pub_date(document: &JatsDocument) -> Option<&Element> {
    let mut chosen = None;
    for node in document.select(PUB_DATES) {
        chosen = Some(node);
        if is_online_pub_date(node) {
            break;
        }
    }
    chosen
}

/// Date of the document itself, without any issue fallback
pub fn resolve_document_date(document: &JatsDocument) -> Result<DateTime<Utc>, ExtractError> {
    select_pub_date(document)
        .and_then(parse_date_node)
        .ok_or(ExtractError::MissingPublicationDate)
}

/// Date of the document, else the issue's date
pub fn resolve_publication_date(
    document: &JatsDocument,
    issue_date: Option<DateTime<Utc>>,
) -> Result<DateTime<Utc>, ExtractError> {
    match resolve_document_date(document) {
        Ok(date) => Ok(date),
        Err(err) => {
            tracing::debug!("no usable pub-date in document, trying issue date");
            issue_date.ok_or(err)
        }
    }
}

/// Read a date from a `pub-date` (or any JATS date) element.
///
/// The `iso-8601-date` attribute wins when it parses; otherwise `<year>` is
/// required and `<month>`/`<day>` default to 1.
pub fn parse_date_node(node: &Element) -> Option<DateTime<Utc>> {
    if let Some(date) = node.attribute("iso-8601-date").and_then(parse_iso_date) {
        return midnight_utc(date);
    }

    let year: i32 = node.select_text("year")?.parse().ok()?;
    let month = match node.select_text("month") {
        Some(month) => parse_month(&month)?,
        None => 1,
    };
    let day: u32 = match node.select_text("day") {
        Some(day) => day.parse().ok()?,
        None => 1,
    };

    NaiveDate::from_ymd_opt(year, month, day).and_then(midnight_utc)
}

/// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`
fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.trim().splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = match parts.next() {
        Some(month) => month.parse().ok()?,
        None => 1,
    };
    let day: u32 = match parts.next() {
        Some(day) => day.get(..2).unwrap_or(day).parse().ok()?,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_month(value: &str) -> Option<u32> {
    let value = value.trim().trim_end_matches('.');
    if let Ok(number) = value.parse::<u32>() {
        return (1..=12).contains(&number).then_some(number);
    }
    MONTHS.get(value.to_lowercase().as_str()).copied()
}

fn midnight_utc(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .map(|midnight| DateTime::from_naive_utc_and_offset(midnight, Utc))
}

/// Wire format for stored dates: RFC 3339 with a numeric offset
pub fn format_wire(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, false)
}
