//! Validated path identifiers.
//!
//! [`Branch`] and [`Slug`] are spliced into upstream URLs, so they are
//! restricted to a conservative character set and may never contain `..`
//! segments.

use std::fmt;

use serde::Serialize;

use crate::error::HubError;

const MAX_LEN: usize = 128;

/// A git branch (or tag) name used to select the documentation revision.
///
/// May contain `/` (e.g. `feature/new-hub`) when sent percent-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Branch(String);

/// A cookbook document key: the markdown file name without `.md`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Branch {
    /// Validates and wraps a branch name.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::InvalidIdentifier`] if the value is empty, too
    /// long, contains characters outside `[A-Za-z0-9._/-]`, or has an
    /// empty/`.`/`..` path segment.
    pub fn parse(raw: &str) -> Result<Self, HubError> {
        validate(raw, "branch", true).map(|()| Self(raw.to_string()))
    }

    /// Returns the branch as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Slug {
    /// Validates and wraps a slug.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::InvalidIdentifier`] if the value is empty, too
    /// long, contains characters outside `[A-Za-z0-9._-]`, or is `.`/`..`.
    pub fn parse(raw: &str) -> Result<Self, HubError> {
        validate(raw, "slug", false).map(|()| Self(raw.to_string()))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate(raw: &str, kind: &'static str, allow_slash: bool) -> Result<(), HubError> {
    let invalid = || HubError::InvalidIdentifier {
        kind,
        value: raw.to_string(),
    };

    if raw.is_empty() || raw.len() > MAX_LEN {
        return Err(invalid());
    }

    let charset_ok = raw.chars().all(|c| {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') || (allow_slash && c == '/')
    });
    if !charset_ok {
        return Err(invalid());
    }

    if raw
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(invalid());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_branches() {
        for raw in ["main", "v1.2.0", "feature/new-hub", "release_2024"] {
            assert!(Branch::parse(raw).is_ok(), "{raw} should be accepted");
        }
    }

    #[test]
    fn rejects_traversal_and_odd_branches() {
        for raw in [
            "",
            "..",
            "main/../secrets",
            "/main",
            "main/",
            "a//b",
            "main?x=1",
            "sp ace",
        ] {
            assert!(Branch::parse(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn slug_rejects_slashes() {
        assert!(Slug::parse("single_classification").is_ok());
        assert!(Slug::parse("hub/index").is_err());
        assert!(Slug::parse("..").is_err());
    }

    #[test]
    fn rejects_overlong_values() {
        let long = "a".repeat(MAX_LEN + 1);
        assert!(Slug::parse(&long).is_err());
        assert!(Slug::parse(&"a".repeat(MAX_LEN)).is_ok());
    }

    #[test]
    fn error_names_the_identifier_kind() {
        let Err(err) = Slug::parse("bad slug") else {
            unreachable!("space must be rejected");
        };
        assert!(err.to_string().contains("slug"));
    }
}
