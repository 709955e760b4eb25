//! # spanmark
//!
//! Typed-entity annotation for free text.
//!
//! Scans a block of text for web links, phone numbers, and postal
//! addresses, and returns an ordered list of non-overlapping spans. Each
//! span carries the entity kind, the byte range it covers, the covered
//! substring, a canonical link-target value, and an opaque caller-supplied
//! style token. The original text is never mutated; a rendering layer maps
//! the spans and tokens to its own representation.
//!
//! ## Quick Start
//!
//! ```rust
//! use spanmark::{Annotator, EntityKind, PatternDetector, StyleToken};
//!
//! let annotator = Annotator::builder()
//!     .detector(PatternDetector::new())
//!     .style(EntityKind::Link, StyleToken::new("blue-underline"))
//!     .style(EntityKind::PhoneNumber, StyleToken::new("green-underline"))
//!     .build()
//!     .unwrap();
//!
//! let spans = annotator
//!     .annotate("Call 555-123-4567 or visit https://example.com")
//!     .unwrap();
//!
//! assert_eq!(spans.len(), 2);
//! assert_eq!(spans[0].text, "555-123-4567");
//! assert_eq!(spans[0].value, "5551234567");
//! assert_eq!(spans[1].value, "https://example.com");
//! ```
//!
//! ## Design
//!
//! - **Detection is pluggable**: any type implementing [`Detector`] can
//!   supply raw matches - the bundled [`PatternDetector`] is one
//!   implementation, not the contract. Regex, ML, or platform grammars
//!   all fit behind the same trait.
//! - **Styling is opaque**: the crate passes [`StyleToken`]s through
//!   without interpreting them. Renderers decide what "blue-underline"
//!   means.
//! - **Failure policy**: configuration errors fail fast at build time;
//!   per-span anomalies degrade into data (empty values, suppressed
//!   matches), never into mid-scan errors.
//! - **No I/O**: fully synchronous, no network, no disk, no shared
//!   mutable state. Concurrent calls from multiple threads are
//!   independent.

#![warn(missing_docs)]

mod annotate;
pub mod detect;
mod entity;
mod error;
mod style;

pub use annotate::{AnnotatedSpan, Annotator, AnnotatorBuilder, ConflictStrategy};
pub use detect::PatternDetector;
pub use entity::{AddressFields, EntityKind, MatchFields, RawMatch};
pub use error::{Error, Result};
pub use style::{StyleRules, StyleToken, NEUTRAL_TOKEN};

/// Scans text and reports raw entity matches.
///
/// The entity-recognition grammar itself is out of the annotator's scope;
/// it only consumes a detector's output. Implementations must be pure with
/// respect to the input: byte offsets into `text`, no retained state
/// between calls.
///
/// Within a single pass a detector is expected to return non-overlapping,
/// in-bounds ranges. Overlap *across* detectors is resolved by the
/// annotator's [`ConflictStrategy`].
pub trait Detector: Send + Sync {
    /// Scan `text` and return zero or more raw matches.
    fn detect(&self, text: &str) -> Result<Vec<RawMatch>>;

    /// The entity kinds this detector can report.
    fn supported_kinds(&self) -> Vec<EntityKind>;

    /// Check if the detector is configured and ready.
    ///
    /// [`AnnotatorBuilder::build`] rejects unavailable detectors up front,
    /// so an annotator never discovers a broken layer mid-scan.
    fn is_available(&self) -> bool {
        true
    }

    /// Detector name/identifier.
    fn name(&self) -> &'static str {
        "unknown"
    }

    /// Short human-readable description.
    fn description(&self) -> &'static str {
        "Unknown detector"
    }
}

/// A canned detector for tests and downstream consumers.
///
/// Returns the same matches for every input.
///
/// # Example
///
/// ```rust
/// use spanmark::{MatchFields, MockDetector, RawMatch};
///
/// let mock = MockDetector::new("test-mock").with_matches(vec![
///     RawMatch::with_fields(MatchFields::Link { url: None }, 0, 4),
/// ]);
/// ```
#[derive(Debug, Clone)]
pub struct MockDetector {
    name: &'static str,
    matches: Vec<RawMatch>,
    kinds: Vec<EntityKind>,
    available: bool,
}

impl MockDetector {
    /// Create a new mock detector.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            matches: Vec::new(),
            kinds: Vec::new(),
            available: true,
        }
    }

    /// Set the matches to return on every call.
    #[must_use]
    pub fn with_matches(mut self, matches: Vec<RawMatch>) -> Self {
        self.matches = matches;
        self
    }

    /// Set the reported supported kinds.
    #[must_use]
    pub fn with_kinds(mut self, kinds: Vec<EntityKind>) -> Self {
        self.kinds = kinds;
        self
    }

    /// Mark the detector unavailable, to exercise fail-fast construction.
    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

impl Detector for MockDetector {
    fn detect(&self, _text: &str) -> Result<Vec<RawMatch>> {
        Ok(self.matches.clone())
    }

    fn supported_kinds(&self) -> Vec<EntityKind> {
        self.kinds.clone()
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        "Mock detector for testing"
    }
}

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use spanmark::prelude::*;
    //!
    //! let annotator = Annotator::with_patterns().unwrap();
    //! let spans = annotator.annotate("visit https://example.com").unwrap();
    //! for span in spans {
    //!     println!("{}: {}", span.kind.as_label(), span.value);
    //! }
    //! ```
    pub use crate::annotate::{AnnotatedSpan, Annotator, AnnotatorBuilder, ConflictStrategy};
    pub use crate::entity::{AddressFields, EntityKind, MatchFields, RawMatch};
    pub use crate::error::{Error, Result};
    pub use crate::style::{StyleRules, StyleToken};
    pub use crate::{Detector, MockDetector, PatternDetector};
}
