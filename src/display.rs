//! Display items derived from a record set
//!
//! Each resolved field becomes one (label, payload) pair ready to be encoded
//! as a scannable code. Placeholder fields are dropped and social handles are
//! expanded into full URIs.

use serde::Serialize;

use crate::abi::ZERO_ADDRESS;
use crate::records::{Field, RecordSet};

/// Turns a raw field value into the scannable payload
type Formatter = fn(&str) -> String;

fn twitter_profile(handle: &str) -> String {
    format!("https://twitter.com/{}", handle)
}

fn telegram_profile(handle: &str) -> String {
    format!("https://t.me/{}", handle)
}

fn github_profile(handle: &str) -> String {
    format!("https://github.com/{}", handle)
}

fn mailto(address: &str) -> String {
    format!("mailto:{}", address)
}

/// Per-field payload formatting; fields not listed pass through unchanged
const FORMATTERS: &[(Field, Formatter)] = &[
    (Field::Twitter, twitter_profile),
    (Field::Telegram, telegram_profile),
    (Field::Github, github_profile),
    (Field::Email, mailto),
];

fn format_payload(field: Field, value: &str) -> String {
    FORMATTERS
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, format)| format(value))
        .unwrap_or_else(|| value.to_string())
}

/// One renderable entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayItem {
    pub label: &'static str,
    pub payload: String,
    #[serde(skip)]
    pub field: Field,
}

/// Ordered display items for one record set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayItems {
    pub items: Vec<DisplayItem>,
    /// False when nothing is worth showing; navigation should be hidden
    pub has_items: bool,
}

impl DisplayItems {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DisplayItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DisplayItem> {
        self.items.iter()
    }
}

fn is_excluded(field: Field, value: &str) -> bool {
    if field.placeholder() == Some(value) {
        return true;
    }
    field == Field::Address && value.eq_ignore_ascii_case(ZERO_ADDRESS)
}

/// Derive display items from `records`, in field order
pub fn derive_items(records: &RecordSet) -> DisplayItems {
    let items: Vec<DisplayItem> = records
        .entries()
        .into_iter()
        .filter(|(field, value)| {
            let found = match records.value(*field) {
                Some(v) => v.is_found(),
                None => true,
            };
            found && !is_excluded(*field, value)
        })
        .map(|(field, value)| DisplayItem {
            label: field.label(),
            payload: format_payload(field, value),
            field,
        })
        .collect();

    DisplayItems {
        has_items: !items.is_empty(),
        items,
    }
}

/// Navigation position within a [`DisplayItems`] list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    /// Cursor at the first item
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor at `index`, clamped to the list
    pub fn at(index: usize, items: &DisplayItems) -> Self {
        Self {
            index: index.min(items.len().saturating_sub(1)),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Item under the cursor
    pub fn current<'a>(&self, items: &'a DisplayItems) -> Option<&'a DisplayItem> {
        items.get(self.index)
    }

    pub fn has_prev(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self, items: &DisplayItems) -> bool {
        self.index + 1 < items.len()
    }

    /// Move forward, stopping at the last item
    pub fn next(self, items: &DisplayItems) -> Self {
        if self.has_next(items) {
            Self { index: self.index + 1 }
        } else {
            self
        }
    }

    /// Move back, stopping at the first item
    pub fn prev(self) -> Self {
        Self {
            index: self.index.saturating_sub(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::FieldValue;

    fn found(v: &str) -> FieldValue {
        FieldValue::Found(v.to_string())
    }

    fn records(values: [FieldValue; 6], dweb: Option<&str>) -> RecordSet {
        RecordSet::new("foo.eth", values, dweb.map(str::to_string))
    }

    #[test]
    fn test_formatting() {
        let set = records(
            [
                found("0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb"),
                found("alice"),
                found("alice_tg"),
                found("alice-gh"),
                found("a@b.com"),
                found("https://alice.example"),
            ],
            Some("https://foo.eth.limo"),
        );

        let items = derive_items(&set);
        let payloads: Vec<&str> = items.iter().map(|i| i.payload.as_str()).collect();
        assert_eq!(
            payloads,
            vec![
                "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
                "https://twitter.com/alice",
                "https://t.me/alice_tg",
                "https://github.com/alice-gh",
                "mailto:a@b.com",
                "https://alice.example",
                "https://foo.eth.limo",
            ]
        );
        assert_eq!(items.items[0].label, "Ethereum Address");
        assert_eq!(items.items[6].label, "dWeb Link");
        assert!(items.has_items);
    }

    #[test]
    fn test_placeholders_skipped() {
        let set = records(
            [
                FieldValue::NotFound,
                found("alice"),
                FieldValue::NotFound,
                FieldValue::NotFound,
                FieldValue::NotFound,
                FieldValue::NotFound,
            ],
            None,
        );

        let items = derive_items(&set);
        assert_eq!(items.len(), 1);
        assert_eq!(items.items[0].field, Field::Twitter);
    }

    #[test]
    fn test_zero_address_and_sentinel_values_skipped() {
        let set = records(
            [
                found(ZERO_ADDRESS),
                found("Twitter name not found"),
                FieldValue::NotFound,
                FieldValue::NotFound,
                found("a@b.com"),
                FieldValue::NotFound,
            ],
            None,
        );

        let items = derive_items(&set);
        assert_eq!(items.len(), 1);
        assert_eq!(items.items[0].payload, "mailto:a@b.com");
    }

    #[test]
    fn test_derive_is_pure() {
        let set = records(
            [
                found("0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb"),
                found("alice"),
                FieldValue::NotFound,
                FieldValue::NotFound,
                FieldValue::NotFound,
                FieldValue::NotFound,
            ],
            Some("https://foo.eth.limo"),
        );
        assert_eq!(derive_items(&set), derive_items(&set));
    }

    #[test]
    fn test_empty_items_flag() {
        let set = records(
            [
                FieldValue::NotFound,
                FieldValue::NotFound,
                FieldValue::NotFound,
                FieldValue::NotFound,
                FieldValue::NotFound,
                FieldValue::NotFound,
            ],
            None,
        );
        let items = derive_items(&set);
        assert!(!items.has_items);
        assert!(items.is_empty());
    }

    #[test]
    fn test_cursor_navigation() {
        let set = records(
            [
                found("0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb"),
                found("alice"),
                FieldValue::NotFound,
                FieldValue::NotFound,
                FieldValue::NotFound,
                FieldValue::NotFound,
            ],
            None,
        );
        let items = derive_items(&set);

        let cursor = Cursor::new();
        assert!(!cursor.has_prev());
        assert!(cursor.has_next(&items));
        assert_eq!(cursor.prev(), cursor);

        let cursor = cursor.next(&items);
        assert_eq!(cursor.index(), 1);
        assert_eq!(cursor.current(&items).map(|i| i.label), Some("Twitter"));
        assert!(!cursor.has_next(&items));
        assert_eq!(cursor.next(&items).index(), 1);

        assert_eq!(Cursor::at(10, &items).index(), 1);
        assert_eq!(Cursor::at(3, &DisplayItems::default()).index(), 0);
    }
}
