//! Artifact locators.
//!
//! A [`Locator`] is the address of one deliverable archive to analyze.
//! Locators must be absolute `http`/`https` URLs because the content
//! analyzer downloads the archive before fingerprinting it. Parsing
//! normalizes the URL, so two spellings of the same address compare
//! equal.

use thiserror::Error;
use url::Url;

/// The address of one deliverable archive.
///
/// Immutable once parsed; one locator corresponds to one pipeline task
/// within an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(Url);

impl Locator {
    /// Parses and validates a locator from its string form.
    ///
    /// The input must be an absolute URL with an `http` or `https`
    /// scheme. The URL is normalized during parsing.
    pub fn parse(input: &str) -> Result<Self, LocatorError> {
        let url = Url::parse(input)?;

        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(LocatorError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Returns the underlying URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the normalized string form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors produced when validating a locator.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// The input is not a valid absolute URL.
    #[error("malformed locator: {0}")]
    Malformed(#[from] url::ParseError),

    /// The URL scheme is not downloadable by the analyzer.
    #[error("unsupported locator scheme: {0}")]
    UnsupportedScheme(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_http_and_https() {
        assert!(Locator::parse("http://example.com/archive.zip").is_ok());
        assert!(Locator::parse("https://example.com/archive.zip").is_ok());
    }

    #[test]
    fn test_parse_rejects_other_schemes() {
        let err = Locator::parse("ftp://example.com/archive.zip").unwrap_err();
        assert!(matches!(err, LocatorError::UnsupportedScheme(s) if s == "ftp"));

        let err = Locator::parse("file:///tmp/archive.zip").unwrap_err();
        assert!(matches!(err, LocatorError::UnsupportedScheme(_)));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(matches!(
            Locator::parse("not a url"),
            Err(LocatorError::Malformed(_))
        ));
        assert!(matches!(
            Locator::parse(""),
            Err(LocatorError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_normalizes() {
        let a = Locator::parse("HTTP://Example.COM/archive.zip").unwrap();
        let b = Locator::parse("http://example.com/archive.zip").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_round_trip() {
        let locator = Locator::parse("https://example.com/dist/app-1.0.zip").unwrap();
        assert_eq!(locator.to_string(), "https://example.com/dist/app-1.0.zip");
        assert_eq!(locator.as_str(), locator.as_url().as_str());
    }
}
