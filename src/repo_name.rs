//! Repository name type.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::error::RepoNameError;

/// A validated repository name, such as `github.com/gorilla/mux`.
///
/// Names are opaque: any non-empty string without the repo-URI delimiters
/// `?` and `#`, or the pretty URL revision marker `@`, is accepted.
///
/// # Examples
///
/// ```
/// use repo_uri::RepoName;
///
/// let name = RepoName::parse("github.com/gorilla/mux").unwrap();
/// assert_eq!(name.as_str(), "github.com/gorilla/mux");
/// assert!(RepoName::parse("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoName(String);

impl RepoName {
    /// Parses a repository name.
    ///
    /// # Errors
    ///
    /// Returns `RepoNameError` if the name is empty or contains `?`, `#`
    /// or `@`.
    pub fn parse(input: &str) -> Result<Self, RepoNameError> {
        if input.is_empty() {
            return Err(RepoNameError::Empty);
        }

        for (i, c) in input.chars().enumerate() {
            if !Self::is_valid_char(c) {
                return Err(RepoNameError::InvalidChar { char: c, position: i });
            }
        }

        Ok(Self(input.to_string()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the character may appear in a repository name.
    #[must_use]
    pub const fn is_valid_char(c: char) -> bool {
        !matches!(c, '?' | '#' | '@')
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RepoName {
    type Err = RepoNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for RepoName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for RepoName {
    type Error = RepoNameError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl Deref for RepoName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialOrd for RepoName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RepoName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RepoName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RepoName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
