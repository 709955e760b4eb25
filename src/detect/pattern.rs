//! Pattern-based detection - finds entities via regex patterns only.
//!
//! The bundled reference implementation of [`Detector`]. It recognizes
//! entities by their format:
//! - Links: `https?://...` and scheme-less `www.` addresses
//! - Phone numbers: US and international formats
//! - Postal addresses: street lines with optional city/state/zip tails
//!
//! Detection grammars with real language models can replace this by
//! implementing [`Detector`] themselves.

use crate::detect::pattern_config::PATTERNS;
use crate::{AddressFields, Detector, EntityKind, Error, MatchFields, RawMatch, Result};

/// Regex-based entity detection over a selectable set of kinds.
///
/// Within a single pass, patterns are applied in precedence order and a
/// claimed range is never matched twice, so the returned matches are
/// non-overlapping.
#[derive(Debug, Clone)]
pub struct PatternDetector {
    kinds: Vec<EntityKind>,
}

impl PatternDetector {
    /// Detector for all entity kinds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kinds: EntityKind::all().to_vec(),
        }
    }

    /// Detector for a subset of entity kinds.
    ///
    /// Duplicate kinds are ignored. An empty selection is a configuration
    /// error: there would be nothing to scan for.
    pub fn for_kinds(kinds: &[EntityKind]) -> Result<Self> {
        if kinds.is_empty() {
            return Err(Error::config("no entity kinds selected"));
        }
        let mut selected = Vec::new();
        for &kind in kinds {
            if !selected.contains(&kind) {
                selected.push(kind);
            }
        }
        Ok(Self { kinds: selected })
    }

    /// The kinds this detector scans for.
    #[must_use]
    pub fn kinds(&self) -> &[EntityKind] {
        &self.kinds
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for PatternDetector {
    fn detect(&self, text: &str) -> Result<Vec<RawMatch>> {
        let mut matches: Vec<RawMatch> = Vec::new();

        for def in PATTERNS.iter() {
            if !self.kinds.contains(&def.kind) {
                continue;
            }

            match def.kind {
                EntityKind::Link => {
                    for m in def.regex.find_iter(text) {
                        let trimmed = trim_url(m.as_str());
                        if trimmed.is_empty() {
                            continue;
                        }
                        let end = m.start() + trimmed.len();
                        if claimed(&matches, m.start(), end) {
                            continue;
                        }
                        let url = if has_www_prefix(trimmed) {
                            // NSDataDetector-style resolution of scheme-less
                            // web addresses
                            format!("http://{trimmed}")
                        } else {
                            trimmed.to_string()
                        };
                        matches.push(RawMatch::new(
                            MatchFields::Link { url: Some(url) },
                            m.start(),
                            end,
                            def.confidence,
                        ));
                    }
                }

                EntityKind::PhoneNumber => {
                    for m in def.regex.find_iter(text) {
                        if claimed(&matches, m.start(), m.end()) {
                            continue;
                        }
                        matches.push(RawMatch::new(
                            MatchFields::Phone {
                                number: Some(dialable(m.as_str())),
                            },
                            m.start(),
                            m.end(),
                            def.confidence,
                        ));
                    }
                }

                EntityKind::Address => {
                    for caps in def.regex.captures_iter(text) {
                        let Some(whole) = caps.get(0) else { continue };
                        if claimed(&matches, whole.start(), whole.end()) {
                            continue;
                        }
                        let fields = AddressFields {
                            street: caps.name("street").map(|g| g.as_str().to_string()),
                            city: caps.name("city").map(|g| g.as_str().to_string()),
                            state: caps.name("state").map(|g| g.as_str().to_string()),
                            zip: caps.name("zip").map(|g| g.as_str().to_string()),
                        };
                        matches.push(RawMatch::new(
                            MatchFields::Address(fields),
                            whole.start(),
                            whole.end(),
                            def.confidence,
                        ));
                    }
                }
            }
        }

        Ok(matches)
    }

    fn supported_kinds(&self) -> Vec<EntityKind> {
        self.kinds.clone()
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "pattern"
    }

    fn description(&self) -> &'static str {
        "Regex-based detection (links, phone numbers, postal addresses)"
    }
}

/// Check if a span overlaps a range already claimed by an earlier pattern.
fn claimed(matches: &[RawMatch], start: usize, end: usize) -> bool {
    matches.iter().any(|m| !(end <= m.start || start >= m.end))
}

/// Strip trailing punctuation that sentence context glues onto URLs.
///
/// A closing parenthesis is kept only when the URL body contains a matching
/// opening one (Wikipedia-style paths).
fn trim_url(raw: &str) -> &str {
    let mut url = raw.trim_end_matches(['.', ',', ';', ':', '!', '?']);
    while url.ends_with(')') {
        let opens = url.matches('(').count();
        let closes = url.matches(')').count();
        if closes <= opens {
            break;
        }
        url = url[..url.len() - 1].trim_end_matches(['.', ',', ';', ':', '!', '?']);
    }
    url
}

fn has_www_prefix(url: &str) -> bool {
    url.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("www."))
}

/// Reduce a matched phone span to its dialable form: digits, plus a
/// leading `+` when present.
fn dialable(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for (i, c) in raw.chars().enumerate() {
        if c.is_ascii_digit() || (c == '+' && i == 0) {
            out.push(c);
        }
    }
    out
}
