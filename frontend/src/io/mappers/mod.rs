//! DTO <-> domain mappers, one per record type.
//!
//! `to_domain` checks the fields a screen cannot work without and parses
//! dates; `to_dto` formats them back to ISO strings for request bodies.

pub mod customer_mapper;
pub mod message_mapper;
pub mod pic_mapper;
pub mod port_call_mapper;
pub mod reference_mapper;
pub mod user_mapper;
pub mod vendor_mapper;
pub mod vessel_mapper;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use crate::domain::birthday::Birthday;
use crate::services::date_utils::parse_date;

/// Map every row, dropping (and logging) the ones that fail.
///
/// A single malformed record must not blank out a whole list screen.
pub fn map_list<D, T>(items: Vec<D>, kind: &str, mut to_domain: impl FnMut(D) -> Result<T>) -> Vec<T> {
    let total = items.len();
    let mapped: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, dto)| match to_domain(dto) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Dropping {} #{} from response: {:#}", kind, index, e);
                None
            }
        })
        .collect();

    if mapped.len() != total {
        log::warn!("Mapped {} of {} {} records", mapped.len(), total, kind);
    }
    mapped
}

/// Record id that must be present on anything loaded from the API
pub(crate) fn require_id(id: Option<String>, kind: &str) -> Result<String> {
    id.ok_or_else(|| anyhow!("{} record has no id", kind))
}

/// Optional date field; blank means absent, garbage is logged and dropped
pub(crate) fn optional_date(value: Option<&str>, field: &str) -> Option<NaiveDate> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    let parsed = parse_date(value);
    if parsed.is_none() {
        log::warn!("Ignoring unreadable {} {:?}", field, value);
    }
    parsed
}

/// Optional birthday field; same rules as [`optional_date`] but a Feb 29 is
/// kept whatever the birth year
pub(crate) fn optional_birthday(value: Option<&str>, field: &str) -> Option<Birthday> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    let parsed = Birthday::parse(value);
    if parsed.is_none() {
        log::warn!("Ignoring unreadable {} {:?}", field, value);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_list_drops_failures() {
        let rows = vec![Some(1), None, Some(3)];
        let mapped = map_list(rows, "number", |row| row.ok_or_else(|| anyhow!("missing")));
        assert_eq!(mapped, vec![1, 3]);
    }

    #[test]
    fn test_optional_date() {
        assert_eq!(optional_date(None, "eta"), None);
        assert_eq!(optional_date(Some("  "), "eta"), None);
        assert_eq!(optional_date(Some("garbage"), "eta"), None);
        assert_eq!(
            optional_date(Some("2025-03-15T00:00:00Z"), "eta"),
            NaiveDate::from_ymd_opt(2025, 3, 15)
        );
    }

    #[test]
    fn test_optional_birthday_keeps_leap_day() {
        assert_eq!(optional_birthday(Some(""), "birthday"), None);
        assert_eq!(optional_birthday(Some("31.02.1990"), "birthday"), None);
        assert_eq!(optional_birthday(Some("1990-02-29"), "birthday"), Birthday::new(1990, 2, 29));
    }
}
