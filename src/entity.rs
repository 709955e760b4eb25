//! Entity kinds and raw detector matches.

use serde::{Deserialize, Serialize};

/// Entity kind classification.
///
/// The three kinds of typed entity a [`Detector`](crate::Detector) can
/// report in free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Web link (URL)
    Link,
    /// Dialable phone number
    PhoneNumber,
    /// Postal address
    Address,
}

impl EntityKind {
    /// Convert to a stable label string.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            EntityKind::Link => "LINK",
            EntityKind::PhoneNumber => "PHONE",
            EntityKind::Address => "ADDRESS",
        }
    }

    /// Parse from a label string. Returns `None` for unknown labels.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_uppercase().as_str() {
            "LINK" | "URL" => Some(EntityKind::Link),
            "PHONE" | "PHONENUMBER" | "PHONE_NUMBER" => Some(EntityKind::PhoneNumber),
            "ADDRESS" | "ADDR" => Some(EntityKind::Address),
            _ => None,
        }
    }

    /// All entity kinds, in canonical order.
    #[must_use]
    pub fn all() -> [EntityKind; 3] {
        [
            EntityKind::Link,
            EntityKind::PhoneNumber,
            EntityKind::Address,
        ]
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// Postal address sub-fields as reported by a detector.
///
/// Any subset of fields may be present. A match without a `street` is
/// never emitted as a span; see [`AddressFields::formatted`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressFields {
    /// Street line, including the house number.
    pub street: Option<String>,
    /// City or locality.
    pub city: Option<String>,
    /// State or region code.
    pub state: Option<String>,
    /// Postal code.
    pub zip: Option<String>,
}

impl AddressFields {
    /// Canonical `"{street} {city}, {state}, {zip}"` form.
    ///
    /// Returns `None` when `street` is absent; such matches are suppressed
    /// entirely. Missing non-street fields render as empty strings, so the
    /// formatting punctuation is always present.
    #[must_use]
    pub fn formatted(&self) -> Option<String> {
        let street = self.street.as_deref()?;
        Some(format!(
            "{} {}, {}, {}",
            street,
            self.city.as_deref().unwrap_or(""),
            self.state.as_deref().unwrap_or(""),
            self.zip.as_deref().unwrap_or(""),
        ))
    }
}

/// Kind-specific payload of a raw match.
///
/// `None` values mean the detector matched a span but could not resolve a
/// canonical value for it. Link and phone matches degrade to an empty value
/// string; address matches without a street are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchFields {
    /// A web link and its resolved target URL, if any.
    Link {
        /// Absolute URL string, or `None` if unresolvable.
        url: Option<String>,
    },
    /// A phone number and its dialable form, if any.
    Phone {
        /// Dialable number string, or `None` if unresolvable.
        number: Option<String>,
    },
    /// A postal address with optional sub-fields.
    Address(AddressFields),
}

impl MatchFields {
    /// The entity kind this payload belongs to.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            MatchFields::Link { .. } => EntityKind::Link,
            MatchFields::Phone { .. } => EntityKind::PhoneNumber,
            MatchFields::Address(_) => EntityKind::Address,
        }
    }

    /// Canonical link-target value, or `None` if the match is suppressed.
    ///
    /// Unresolved link/phone values degrade to the empty string rather than
    /// suppressing the span; only a street-less address suppresses.
    #[must_use]
    pub fn canonical_value(&self) -> Option<String> {
        match self {
            MatchFields::Link { url } => Some(url.clone().unwrap_or_default()),
            MatchFields::Phone { number } => Some(number.clone().unwrap_or_default()),
            MatchFields::Address(fields) => fields.formatted(),
        }
    }
}

/// A raw span reported by a [`Detector`](crate::Detector).
///
/// Offsets are byte offsets into the scanned text, half-open. Detectors are
/// expected to return in-bounds, non-overlapping ranges within a single
/// pass; the annotator discards ranges that are not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMatch {
    /// Kind-specific payload.
    pub fields: MatchFields,
    /// Start position (byte offset in the scanned text).
    pub start: usize,
    /// End position (byte offset, exclusive).
    pub end: usize,
    /// Confidence score (0.0-1.0). Only consulted when resolving overlap
    /// across detector layers.
    pub confidence: f64,
}

impl RawMatch {
    /// Create a new raw match. Confidence is clamped to [0, 1].
    #[must_use]
    pub fn new(fields: MatchFields, start: usize, end: usize, confidence: f64) -> Self {
        Self {
            fields,
            start,
            end,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Create a raw match with default confidence (1.0).
    #[must_use]
    pub fn with_fields(fields: MatchFields, start: usize, end: usize) -> Self {
        Self::new(fields, start, end, 1.0)
    }

    /// The entity kind of this match.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.fields.kind()
    }

    /// Check if this match overlaps with another.
    #[must_use]
    pub fn overlaps(&self, other: &RawMatch) -> bool {
        !(self.end <= other.start || other.end <= self.start)
    }

    /// Check that the range is non-empty, in bounds, and on `char`
    /// boundaries of `text`.
    #[must_use]
    pub fn is_within(&self, text: &str) -> bool {
        self.start < self.end
            && self.end <= text.len()
            && text.is_char_boundary(self.start)
            && text.is_char_boundary(self.end)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn confidence_always_clamped(conf in -10.0f64..10.0) {
            let m = RawMatch::new(MatchFields::Link { url: None }, 0, 4, conf);
            prop_assert!(m.confidence >= 0.0);
            prop_assert!(m.confidence <= 1.0);
        }

        #[test]
        fn overlap_is_symmetric(
            s1 in 0usize..100,
            len1 in 1usize..50,
            s2 in 0usize..100,
            len2 in 1usize..50,
        ) {
            let m1 = RawMatch::with_fields(MatchFields::Link { url: None }, s1, s1 + len1);
            let m2 = RawMatch::with_fields(MatchFields::Phone { number: None }, s2, s2 + len2);
            prop_assert_eq!(m1.overlaps(&m2), m2.overlaps(&m1));
        }

        #[test]
        fn formatted_address_always_carries_punctuation(
            street in "[A-Za-z0-9 ]{1,20}",
            city in proptest::option::of("[A-Za-z]{1,12}"),
            state in proptest::option::of("[A-Z]{2}"),
            zip in proptest::option::of("[0-9]{5}"),
        ) {
            let fields = AddressFields {
                street: Some(street.clone()),
                city,
                state,
                zip,
            };
            let formatted = fields.formatted().unwrap();
            prop_assert!(formatted.starts_with(&street));
            prop_assert_eq!(formatted.matches(", ").count(), 2);
        }
    }
}
