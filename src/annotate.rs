//! The entity annotator: detection, canonicalization, styling.
//!
//! [`Annotator`] runs a priority-ordered list of [`Detector`] layers over a
//! block of text in a single pass each, canonicalizes every raw match into
//! a link-target value, resolves overlap across layers, and returns the
//! spans sorted by start offset with a style token attached per kind.
//!
//! The input text is never mutated; a consumer re-renders it using the
//! returned offsets, values, and tokens.
//!
//! # Failure policy
//!
//! Configuration problems (no detectors, an unavailable detector) surface
//! as [`Error::Config`] from [`AnnotatorBuilder::build`], before any
//! scanning. Per-span anomalies never abort a call: an unresolvable link
//! or phone value degrades to an empty string, a street-less address match
//! is dropped, and a malformed detector range is discarded. Callers get
//! either a complete result or a single upfront configuration failure.
//!
//! # Example
//!
//! ```rust
//! use spanmark::{Annotator, EntityKind, PatternDetector, StyleToken};
//!
//! let annotator = Annotator::builder()
//!     .detector(PatternDetector::new())
//!     .style(EntityKind::Link, StyleToken::new("blue-underline"))
//!     .build()
//!     .unwrap();
//!
//! let spans = annotator
//!     .annotate("Call 555-123-4567 or visit https://example.com")
//!     .unwrap();
//! assert_eq!(spans.len(), 2);
//! assert_eq!(spans[0].value, "5551234567");
//! assert_eq!(spans[1].value, "https://example.com");
//! ```

use crate::{Detector, EntityKind, Error, RawMatch, Result, StyleRules, StyleToken};
use serde::{Deserialize, Serialize};

// =============================================================================
// Conflict Resolution
// =============================================================================

/// Strategy for resolving overlapping matches across detector layers.
///
/// Within one layer's pass, matches are assumed non-overlapping. Across
/// layers there is no such guarantee, so an explicit policy decides which
/// span survives. The output never contains overlapping spans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictStrategy {
    /// First layer to claim a span wins. Simple and predictable.
    #[default]
    Priority,

    /// Longest span wins. Prefers "1 Main St, Springfield, IL" over
    /// "Springfield, IL".
    LongestSpan,

    /// Highest confidence score wins.
    HighestConf,
}

impl ConflictStrategy {
    fn resolve(&self, existing: &RawMatch, candidate: &RawMatch) -> Resolution {
        match self {
            ConflictStrategy::Priority => Resolution::KeepExisting,

            ConflictStrategy::LongestSpan => {
                let existing_len = existing.end - existing.start;
                let candidate_len = candidate.end - candidate.start;
                if candidate_len > existing_len {
                    Resolution::Replace
                } else {
                    Resolution::KeepExisting
                }
            }

            ConflictStrategy::HighestConf => {
                if candidate.confidence > existing.confidence {
                    Resolution::Replace
                } else {
                    Resolution::KeepExisting
                }
            }
        }
    }
}

#[derive(Debug)]
enum Resolution {
    KeepExisting,
    Replace,
}

// =============================================================================
// AnnotatedSpan
// =============================================================================

/// A styled, canonicalized span of the input text.
///
/// Carries everything a consumer needs to re-render the original text with
/// per-span styling and per-span link targets without re-running detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedSpan {
    /// Entity kind of the span.
    pub kind: EntityKind,
    /// Start position (byte offset in the annotated text).
    pub start: usize,
    /// End position (byte offset, exclusive).
    pub end: usize,
    /// The substring of the input the span covers.
    pub text: String,
    /// Canonical link-target value: the URL, the dialable number, or the
    /// formatted address. Empty when the detector matched a span but could
    /// not resolve a value for it.
    pub value: String,
    /// The style token resolved for this span's kind.
    pub style: StyleToken,
}

// =============================================================================
// Annotator
// =============================================================================

/// Scans text for typed entities and returns ordered, styled spans.
///
/// Built via [`Annotator::builder`]; construction fails fast on a
/// misconfigured detector set. A built annotator is immutable, holds no
/// per-call state, and is safe to share across threads.
pub struct Annotator {
    detectors: Vec<Box<dyn Detector + Send + Sync>>,
    styles: StyleRules,
    strategy: ConflictStrategy,
}

impl std::fmt::Debug for Annotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Annotator")
            .field("detectors", &self.detectors.len())
            .field("styles", &self.styles)
            .field("strategy", &self.strategy)
            .finish()
    }
}

/// Builder for [`Annotator`] with fluent configuration.
#[derive(Default)]
pub struct AnnotatorBuilder {
    detectors: Vec<Box<dyn Detector + Send + Sync>>,
    styles: StyleRules,
    strategy: ConflictStrategy,
}

impl AnnotatorBuilder {
    /// Add a detector layer (order matters: earlier = higher priority).
    #[must_use]
    pub fn detector<D: Detector + Send + Sync + 'static>(mut self, detector: D) -> Self {
        self.detectors.push(Box::new(detector));
        self
    }

    /// Add a boxed detector layer.
    #[must_use]
    pub fn detector_boxed(mut self, detector: Box<dyn Detector + Send + Sync>) -> Self {
        self.detectors.push(detector);
        self
    }

    /// Set the style token for an entity kind.
    #[must_use]
    pub fn style(mut self, kind: EntityKind, token: impl Into<StyleToken>) -> Self {
        self.styles.set(kind, token);
        self
    }

    /// Replace the whole style rule set.
    #[must_use]
    pub fn styles(mut self, styles: StyleRules) -> Self {
        self.styles = styles;
        self
    }

    /// Set the cross-layer conflict resolution strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: ConflictStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Build the configured annotator.
    ///
    /// Fails with [`Error::Config`] when no detector was supplied or any
    /// detector reports itself unavailable. Nothing is scanned on failure.
    pub fn build(self) -> Result<Annotator> {
        if self.detectors.is_empty() {
            return Err(Error::config("at least one detector is required"));
        }
        for detector in &self.detectors {
            if !detector.is_available() {
                return Err(Error::config(format!(
                    "detector '{}' is not available",
                    detector.name()
                )));
            }
        }
        Ok(Annotator {
            detectors: self.detectors,
            styles: self.styles,
            strategy: self.strategy,
        })
    }
}

impl Annotator {
    /// Create a builder for custom configuration.
    #[must_use]
    pub fn builder() -> AnnotatorBuilder {
        AnnotatorBuilder::default()
    }

    /// Annotator over the bundled [`PatternDetector`](crate::PatternDetector)
    /// with neutral styles.
    pub fn with_patterns() -> Result<Self> {
        Self::builder()
            .detector(crate::PatternDetector::new())
            .build()
    }

    /// Number of detector layers.
    #[must_use]
    pub fn num_detectors(&self) -> usize {
        self.detectors.len()
    }

    /// Detector names in priority order.
    #[must_use]
    pub fn detector_names(&self) -> Vec<&str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// The configured conflict strategy.
    #[must_use]
    pub fn strategy(&self) -> ConflictStrategy {
        self.strategy
    }

    /// Scan `text` and return ordered, non-overlapping, styled spans.
    ///
    /// Deterministic for a given (text, detector set) pair. Empty input
    /// yields an empty vector. Errors only when a detector's own `detect`
    /// call fails.
    pub fn annotate(&self, text: &str) -> Result<Vec<AnnotatedSpan>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        // (match, canonical value) pairs that survived classification
        let mut kept: Vec<(RawMatch, String)> = Vec::new();

        for detector in &self.detectors {
            for candidate in detector.detect(text)? {
                if !candidate.is_within(text) {
                    log::debug!(
                        "[annotate] dropping malformed {} range {}..{} from '{}'",
                        candidate.kind().as_label(),
                        candidate.start,
                        candidate.end,
                        detector.name()
                    );
                    continue;
                }

                let Some(value) = candidate.fields.canonical_value() else {
                    // Street-less address: suppressed, not an error
                    continue;
                };

                // A candidate survives only by beating every kept match it
                // overlaps; vacuously true when it overlaps none.
                let beats_all = kept
                    .iter()
                    .filter(|(m, _)| m.overlaps(&candidate))
                    .all(|(m, _)| {
                        matches!(self.strategy.resolve(m, &candidate), Resolution::Replace)
                    });
                if beats_all {
                    kept.retain(|(m, _)| !m.overlaps(&candidate));
                    kept.push((candidate, value));
                }
            }
        }

        let mut spans: Vec<AnnotatedSpan> = kept
            .into_iter()
            .map(|(m, value)| {
                let kind = m.kind();
                AnnotatedSpan {
                    kind,
                    start: m.start,
                    end: m.end,
                    text: text[m.start..m.end].to_string(),
                    value,
                    style: self.styles.resolve(kind),
                }
            })
            .collect();

        spans.sort_by_key(|s| (s.start, s.end));
        Ok(spans)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::{MatchFields, MockDetector};
    use proptest::prelude::*;

    fn arb_strategy() -> impl Strategy<Value = ConflictStrategy> {
        prop_oneof![
            Just(ConflictStrategy::Priority),
            Just(ConflictStrategy::LongestSpan),
            Just(ConflictStrategy::HighestConf),
        ]
    }

    fn arb_match(max_len: usize) -> impl Strategy<Value = RawMatch> {
        (0..max_len, 1..20usize, 0.0f64..=1.0, 0..3u8).prop_map(move |(start, len, conf, kind)| {
            let end = (start + len).min(max_len);
            let fields = match kind {
                0 => MatchFields::Link {
                    url: Some("https://example.com".into()),
                },
                1 => MatchFields::Phone {
                    number: Some("5551234567".into()),
                },
                _ => MatchFields::Address(crate::AddressFields {
                    street: Some("1 Main St".into()),
                    ..Default::default()
                }),
            };
            RawMatch::new(fields, start, end, conf)
        })
    }

    proptest! {
        #[test]
        fn output_never_overlaps(
            matches in proptest::collection::vec(arb_match(40), 0..12),
            strategy in arb_strategy(),
        ) {
            let text = "x".repeat(40);
            let annotator = Annotator::builder()
                .detector(MockDetector::new("mock").with_matches(matches))
                .strategy(strategy)
                .build()
                .unwrap();

            let spans = annotator.annotate(&text).unwrap();
            for (i, a) in spans.iter().enumerate() {
                for b in &spans[i + 1..] {
                    prop_assert!(a.end <= b.start || b.end <= a.start);
                }
            }
        }

        #[test]
        fn output_ranges_valid_and_sorted(
            matches in proptest::collection::vec(arb_match(40), 0..12),
            strategy in arb_strategy(),
        ) {
            let text = "x".repeat(40);
            let annotator = Annotator::builder()
                .detector(MockDetector::new("mock").with_matches(matches))
                .strategy(strategy)
                .build()
                .unwrap();

            let spans = annotator.annotate(&text).unwrap();
            for span in &spans {
                prop_assert!(span.start < span.end);
                prop_assert!(span.end <= text.len());
            }
            for pair in spans.windows(2) {
                prop_assert!(pair[0].start <= pair[1].start);
            }
        }

        #[test]
        fn annotation_is_deterministic(
            matches in proptest::collection::vec(arb_match(40), 0..12),
            strategy in arb_strategy(),
        ) {
            let text = "x".repeat(40);
            let annotator = Annotator::builder()
                .detector(MockDetector::new("mock").with_matches(matches))
                .strategy(strategy)
                .build()
                .unwrap();

            let first = annotator.annotate(&text).unwrap();
            let second = annotator.annotate(&text).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
