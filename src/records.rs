//! Record fields and the per-request record set

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use crate::abi::ZERO_ADDRESS;

/// One field of a record set, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Address,
    Twitter,
    Telegram,
    Github,
    Email,
    Url,
    DWebLink,
}

impl Field {
    /// Fields looked up on the resolver, in order
    pub const LOOKUPS: [Field; 6] = [
        Field::Address,
        Field::Twitter,
        Field::Telegram,
        Field::Github,
        Field::Email,
        Field::Url,
    ];

    /// Fields backed by a text record
    pub const TEXT: [Field; 5] = [
        Field::Twitter,
        Field::Telegram,
        Field::Github,
        Field::Email,
        Field::Url,
    ];

    /// Text record key, `None` for the address and derived fields
    pub fn record_key(self) -> Option<&'static str> {
        match self {
            Field::Twitter => Some("com.twitter"),
            Field::Telegram => Some("org.telegram"),
            Field::Github => Some("com.github"),
            Field::Email => Some("email"),
            Field::Url => Some("url"),
            Field::Address | Field::DWebLink => None,
        }
    }

    /// Human-facing label
    pub fn label(self) -> &'static str {
        match self {
            Field::Address => "Ethereum Address",
            Field::Twitter => "Twitter",
            Field::Telegram => "Telegram",
            Field::Github => "Github",
            Field::Email => "Email",
            Field::Url => "URL",
            Field::DWebLink => "dWeb Link",
        }
    }

    /// Sentinel shown when the field resolved to nothing
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Field::Address => Some("Address not found"),
            Field::Twitter => Some("Twitter name not found"),
            Field::Telegram => Some("Telegram name not found"),
            Field::Github => Some("GitHub name not found"),
            Field::Email => Some("Email not found"),
            Field::Url => Some("URL not found"),
            Field::DWebLink => None,
        }
    }

    /// Stable key used in JSON output
    pub fn json_key(self) -> &'static str {
        match self {
            Field::Address => "ethAddress",
            Field::Twitter => "twitterName",
            Field::Telegram => "telegramName",
            Field::Github => "githubName",
            Field::Email => "emailAddress",
            Field::Url => "url",
            Field::DWebLink => "dWebLink",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized value of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Found(String),
    NotFound,
}

impl FieldValue {
    /// Normalize a raw address lookup: empty or zero address is not found
    pub fn from_address(raw: String) -> Self {
        if raw.is_empty() || raw.eq_ignore_ascii_case(ZERO_ADDRESS) {
            FieldValue::NotFound
        } else {
            FieldValue::Found(raw)
        }
    }

    /// Normalize a raw text lookup: empty is not found
    pub fn from_text(raw: String) -> Self {
        if raw.is_empty() {
            FieldValue::NotFound
        } else {
            FieldValue::Found(raw)
        }
    }

    /// The resolved value, if any
    pub fn as_found(&self) -> Option<&str> {
        match self {
            FieldValue::Found(value) => Some(value),
            FieldValue::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FieldValue::Found(_))
    }
}

/// Record set produced by one resolution
///
/// Holds the six looked-up fields in [`Field::LOOKUPS`] order and the optional
/// dWeb link. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    name: String,
    values: [FieldValue; 6],
    dweb_link: Option<String>,
}

impl RecordSet {
    /// Build a record set; `values` follow [`Field::LOOKUPS`] order
    pub fn new(name: impl Into<String>, values: [FieldValue; 6], dweb_link: Option<String>) -> Self {
        Self {
            name: name.into(),
            values,
            dweb_link,
        }
    }

    /// Name this record set was resolved for
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of a looked-up field; `None` for the derived dWeb link field
    pub fn value(&self, field: Field) -> Option<&FieldValue> {
        Field::LOOKUPS
            .iter()
            .position(|f| *f == field)
            .map(|i| &self.values[i])
    }

    /// Derived dWeb link, absent for names outside `.eth`
    pub fn dweb_link(&self) -> Option<&str> {
        self.dweb_link.as_deref()
    }

    /// Every present entry in display order, placeholders rendered as sentinels
    pub fn entries(&self) -> Vec<(Field, &str)> {
        let mut entries: Vec<(Field, &str)> = Field::LOOKUPS
            .iter()
            .zip(self.values.iter())
            .map(|(field, value)| {
                let shown = match value {
                    FieldValue::Found(v) => v.as_str(),
                    FieldValue::NotFound => field.placeholder().unwrap_or_default(),
                };
                (*field, shown)
            })
            .collect();

        if let Some(link) = &self.dweb_link {
            entries.push((Field::DWebLink, link.as_str()));
        }
        entries
    }

    /// Whether any looked-up field resolved
    pub fn has_any_record(&self) -> bool {
        self.values.iter().any(FieldValue::is_found)
    }
}

impl Serialize for RecordSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len() + 1))?;
        map.serialize_entry("ensName", &self.name)?;
        for (field, value) in entries {
            map.serialize_entry(field.json_key(), value)?;
        }
        map.end()
    }
}

/// Result of resolving one name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// At least one field resolved
    Found(RecordSet),
    /// Address and every text record came back empty
    NothingFound,
}

impl ResolutionOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, ResolutionOutcome::Found(_))
    }

    /// Record set of a successful resolution
    pub fn record_set(&self) -> Option<&RecordSet> {
        match self {
            ResolutionOutcome::Found(records) => Some(records),
            ResolutionOutcome::NothingFound => None,
        }
    }
}

impl Serialize for ResolutionOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("found", &self.is_found())?;
        if let ResolutionOutcome::Found(records) = self {
            map.serialize_entry("records", records)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordSet {
        RecordSet::new(
            "foo.eth",
            [
                FieldValue::Found("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".to_string()),
                FieldValue::Found("alice".to_string()),
                FieldValue::NotFound,
                FieldValue::NotFound,
                FieldValue::Found("a@b.com".to_string()),
                FieldValue::NotFound,
            ],
            Some("https://foo.eth.limo".to_string()),
        )
    }

    #[test]
    fn test_address_normalization() {
        assert_eq!(FieldValue::from_address(String::new()), FieldValue::NotFound);
        assert_eq!(FieldValue::from_address(ZERO_ADDRESS.to_string()), FieldValue::NotFound);
        assert!(FieldValue::from_address("0x01".to_string()).is_found());
        assert_eq!(FieldValue::from_text(String::new()), FieldValue::NotFound);
    }

    #[test]
    fn test_entries_render_placeholders() {
        let records = sample();
        let entries = records.entries();

        assert_eq!(entries.len(), 7);
        assert_eq!(entries[2], (Field::Telegram, "Telegram name not found"));
        assert_eq!(entries[3], (Field::Github, "GitHub name not found"));
        assert_eq!(entries[6], (Field::DWebLink, "https://foo.eth.limo"));
    }

    #[test]
    fn test_value_lookup() {
        let records = sample();
        assert_eq!(records.value(Field::Twitter).and_then(FieldValue::as_found), Some("alice"));
        assert_eq!(records.value(Field::Url), Some(&FieldValue::NotFound));
        assert_eq!(records.value(Field::DWebLink), None);
    }

    #[test]
    fn test_json_output() {
        let json = serde_json::to_value(ResolutionOutcome::Found(sample())).unwrap();
        assert_eq!(json["found"], true);
        assert_eq!(json["records"]["ensName"], "foo.eth");
        assert_eq!(json["records"]["url"], "URL not found");
        assert_eq!(json["records"]["dWebLink"], "https://foo.eth.limo");

        let json = serde_json::to_value(ResolutionOutcome::NothingFound).unwrap();
        assert_eq!(json, serde_json::json!({"found": false}));
    }

    #[test]
    fn test_every_lookup_field_has_placeholder() {
        for field in Field::LOOKUPS {
            assert!(field.placeholder().is_some());
        }
        for field in Field::TEXT {
            assert!(field.record_key().is_some());
        }
    }
}
