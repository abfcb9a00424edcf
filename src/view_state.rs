//! View state tag for alternate blob display modes.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::error::ViewStateError;

/// A named alternate display mode attached to a location, such as
/// `references` or `impl`.
///
/// The set of tags is open. Only the hash fragment separators are rejected
/// so that a view state always survives a round trip through a pretty URL.
///
/// # Examples
///
/// ```
/// use repo_uri::ViewState;
///
/// let view = ViewState::parse("references").unwrap();
/// assert_eq!(view.as_str(), "references");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewState(String);

impl ViewState {
    /// Parses a view state tag.
    ///
    /// # Errors
    ///
    /// Returns `ViewStateError` if the tag is empty or contains `$`, `&`
    /// or `#`.
    pub fn parse(input: &str) -> Result<Self, ViewStateError> {
        if input.is_empty() {
            return Err(ViewStateError::Empty);
        }

        for (i, c) in input.chars().enumerate() {
            if !Self::is_valid_char(c) {
                return Err(ViewStateError::InvalidChar { char: c, position: i });
            }
        }

        Ok(Self(input.to_string()))
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the character may appear in a view state tag.
    #[must_use]
    pub const fn is_valid_char(c: char) -> bool {
        !matches!(c, '$' | '&' | '#')
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ViewState {
    type Err = ViewStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ViewState {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ViewState {
    type Error = ViewStateError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl Deref for ViewState {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ViewState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ViewState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_references() {
        assert_eq!(ViewState::parse("references").unwrap().as_str(), "references");
    }

    #[test]
    fn parse_open_tag() {
        assert!(ViewState::parse("impl").is_ok());
        assert!(ViewState::parse("def:local").is_ok());
    }

    #[test]
    fn parse_empty_fails() {
        assert_eq!(ViewState::parse(""), Err(ViewStateError::Empty));
    }

    #[test]
    fn parse_separator_fails() {
        let result = ViewState::parse("refs&x=1");
        assert!(matches!(result, Err(ViewStateError::InvalidChar { char: '&', position: 4 })));
        assert!(ViewState::parse("a$b").is_err());
        assert!(ViewState::parse("a#b").is_err());
    }
}
