//! Bundled detector implementations.
//!
//! One reference detector ships with the crate:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │ PatternDetector                                     │
//! │   Links / phone numbers / postal addresses          │
//! │   Regex-based, zero setup, always available         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Anything richer (a platform text-analysis service, an ML grammar)
//! plugs in through the [`Detector`](crate::Detector) trait and composes
//! with this one as an [`Annotator`](crate::Annotator) layer.

pub mod pattern;
pub mod pattern_config;

pub use pattern::PatternDetector;
