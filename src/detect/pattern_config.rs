//! Declarative pattern configuration for [`PatternDetector`](super::PatternDetector).
//!
//! Patterns are defined once and compiled lazily. Order in [`PATTERNS`]
//! is precedence order within a single pass: earlier patterns claim their
//! ranges first.

use crate::EntityKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// A pattern definition: regex + entity kind + confidence + name.
pub struct PatternDef {
    /// The compiled regex pattern.
    pub regex: &'static Lazy<Regex>,
    /// The entity kind to assign to matches.
    pub kind: EntityKind,
    /// Confidence score (0.0-1.0).
    pub confidence: f64,
    /// Pattern name, used in debug logging.
    pub name: &'static str,
}

/// All pattern definitions, in precedence order.
///
/// URLs first (most specific), then addresses, then phone numbers (the
/// most false-positive prone). A phone-looking digit run inside an
/// already-claimed URL never surfaces as a second match.
pub static PATTERNS: Lazy<Vec<PatternDef>> = Lazy::new(|| {
    vec![
        PatternDef { regex: &URL_SCHEME, kind: EntityKind::Link, confidence: 0.98, name: "URL_SCHEME" },
        PatternDef { regex: &URL_WWW, kind: EntityKind::Link, confidence: 0.92, name: "URL_WWW" },
        PatternDef { regex: &ADDR_STREET, kind: EntityKind::Address, confidence: 0.90, name: "ADDR_STREET" },
        PatternDef { regex: &ADDR_CITY_STATE_ZIP, kind: EntityKind::Address, confidence: 0.80, name: "ADDR_CITY_STATE_ZIP" },
        PatternDef { regex: &PHONE_US, kind: EntityKind::PhoneNumber, confidence: 0.85, name: "PHONE_US" },
        PatternDef { regex: &PHONE_INTL, kind: EntityKind::PhoneNumber, confidence: 0.85, name: "PHONE_INTL" },
    ]
});

// =============================================================================
// Regex Definitions (compiled once, lazily)
// =============================================================================
// Note: These patterns are compile-time constants. If any regex is invalid,
// it's a programmer error that should panic immediately with a clear message.

static URL_SCHEME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bhttps?://[^\s<>\[\]{}|\\^`\x00-\x1f]+").expect("URL_SCHEME regex is invalid")
});

// Scheme-less web addresses; the canonical value gets an http:// prefix.
static URL_WWW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bwww\.[a-z0-9][a-z0-9-]*(?:\.[a-z0-9][a-z0-9-]*)+[^\s<>\[\]{}|\\^`\x00-\x1f]*")
        .expect("URL_WWW regex is invalid")
});

// Street line with optional city/state/zip tail. Capture groups feed
// AddressFields; the street group is what keeps the match alive downstream.
static ADDR_STREET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        \b
        (?P<street>
            \d{1,5} \s+
            (?:[A-Za-z0-9'.-]+ \s+){0,3}
            (?i:St|Street|Ave|Avenue|Blvd|Boulevard|Rd|Road|Dr|Drive|Ln|Lane|Ct|Court|Way|Pl|Place)\.?
        )
        (?: ,? \s+ (?P<city>[A-Z][A-Za-z'.-]*(?:\s[A-Z][A-Za-z'.-]*)*) )?
        (?: ,? \s+ (?P<state>[A-Z]{2}) )?
        (?: ,? \s+ (?P<zip>\d{5}(?:-\d{4})?) )?
        \b",
    )
    .expect("ADDR_STREET regex is invalid")
});

// City-state-zip fragment with no street line. Reported like any other
// address match; the annotator's street gate suppresses it.
static ADDR_CITY_STATE_ZIP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        \b
        (?P<city>[A-Z][A-Za-z'.-]*(?:\s[A-Z][A-Za-z'.-]*)*)
        ,\s* (?P<state>[A-Z]{2})
        \s+ (?P<zip>\d{5}(?:-\d{4})?)
        \b",
    )
    .expect("ADDR_CITY_STATE_ZIP regex is invalid")
});

static PHONE_US: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b")
        .expect("PHONE_US regex is invalid")
});

static PHONE_INTL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+\d{1,3}[-.\s]?\d{1,4}[-.\s]?\d{1,4}[-.\s]?\d{1,9}\b")
        .expect("PHONE_INTL regex is invalid")
});
