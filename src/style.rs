//! Opaque style tokens and per-kind style rules.

use crate::EntityKind;
use serde::{Deserialize, Serialize};

/// Label of the token resolved for kinds with no explicit rule.
pub const NEUTRAL_TOKEN: &str = "default";

/// An opaque style identifier.
///
/// The annotator never interprets tokens; a rendering layer maps them to
/// its own visual representation (a color, a CSS class, an ANSI sequence).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleToken(String);

impl StyleToken {
    /// Create a style token.
    pub fn new(token: impl Into<String>) -> Self {
        StyleToken(token.into())
    }

    /// The neutral default token.
    #[must_use]
    pub fn neutral() -> Self {
        StyleToken(NEUTRAL_TOKEN.to_string())
    }

    /// The token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StyleToken {
    fn from(token: &str) -> Self {
        StyleToken::new(token)
    }
}

impl From<String> for StyleToken {
    fn from(token: String) -> Self {
        StyleToken(token)
    }
}

impl std::fmt::Display for StyleToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mapping from entity kind to style token.
///
/// Kinds without an explicit rule resolve to [`StyleToken::neutral`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRules {
    link: Option<StyleToken>,
    phone: Option<StyleToken>,
    address: Option<StyleToken>,
}

impl StyleRules {
    /// Create an empty rule set (everything resolves to neutral).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the token for a kind, builder-style.
    #[must_use]
    pub fn with(mut self, kind: EntityKind, token: impl Into<StyleToken>) -> Self {
        self.set(kind, token);
        self
    }

    /// Set the token for a kind.
    pub fn set(&mut self, kind: EntityKind, token: impl Into<StyleToken>) {
        let slot = match kind {
            EntityKind::Link => &mut self.link,
            EntityKind::PhoneNumber => &mut self.phone,
            EntityKind::Address => &mut self.address,
        };
        *slot = Some(token.into());
    }

    /// Resolve the token for a kind, falling back to the neutral default.
    #[must_use]
    pub fn resolve(&self, kind: EntityKind) -> StyleToken {
        let slot = match kind {
            EntityKind::Link => &self.link,
            EntityKind::PhoneNumber => &self.phone,
            EntityKind::Address => &self.address,
        };
        slot.clone().unwrap_or_else(StyleToken::neutral)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_falls_back_to_neutral() {
        let rules = StyleRules::new();
        assert_eq!(rules.resolve(EntityKind::Link).as_str(), NEUTRAL_TOKEN);
    }

    #[test]
    fn test_resolve_explicit_rule() {
        let rules = StyleRules::new()
            .with(EntityKind::Link, "blue-underline")
            .with(EntityKind::PhoneNumber, "green");

        assert_eq!(rules.resolve(EntityKind::Link).as_str(), "blue-underline");
        assert_eq!(rules.resolve(EntityKind::PhoneNumber).as_str(), "green");
        assert_eq!(rules.resolve(EntityKind::Address).as_str(), NEUTRAL_TOKEN);
    }

    #[test]
    fn test_set_overwrites() {
        let mut rules = StyleRules::new();
        rules.set(EntityKind::Address, "red");
        rules.set(EntityKind::Address, "blue");
        assert_eq!(rules.resolve(EntityKind::Address).as_str(), "blue");
    }
}
