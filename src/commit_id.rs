//! Commit ID type.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::constants::COMMIT_ID_LENGTH;
use crate::error::CommitIdError;

/// A resolved, immutable commit identifier: 40 lowercase hex characters.
///
/// # Examples
///
/// ```
/// use repo_uri::CommitId;
///
/// let id = CommitId::parse("24fca303ac6da784b9e8269f724ddeb0b2eea5e7").unwrap();
/// assert_eq!(id.as_str(), "24fca303ac6da784b9e8269f724ddeb0b2eea5e7");
/// assert!(!CommitId::is_commit_id("main"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(String);

impl CommitId {
    /// Parses a commit ID.
    ///
    /// # Errors
    ///
    /// Returns `CommitIdError` if the input is not exactly 40 characters of
    /// `[0-9a-f]`.
    pub fn parse(input: &str) -> Result<Self, CommitIdError> {
        if input.len() != COMMIT_ID_LENGTH {
            return Err(CommitIdError::InvalidLength {
                expected: COMMIT_ID_LENGTH,
                actual: input.len(),
            });
        }

        for (i, c) in input.chars().enumerate() {
            if !Self::is_valid_char(c) {
                return Err(CommitIdError::InvalidChar { char: c, position: i });
            }
        }

        Ok(Self(input.to_string()))
    }

    /// Returns true if `rev` has the shape of a full commit ID.
    #[must_use]
    pub fn is_commit_id(rev: &str) -> bool {
        rev.len() == COMMIT_ID_LENGTH && rev.chars().all(Self::is_valid_char)
    }

    /// Returns the commit ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the character is a lowercase hex digit.
    #[must_use]
    pub const fn is_valid_char(c: char) -> bool {
        c.is_ascii_digit() || matches!(c, 'a'..='f')
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CommitId {
    type Err = CommitIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for CommitId {
    type Error = CommitIdError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl Deref for CommitId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CommitId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CommitId {
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

    const COMMIT: &str = "24fca303ac6da784b9e8269f724ddeb0b2eea5e7";

    #[test]
    fn parse_valid_commit() {
        let id = CommitId::parse(COMMIT).unwrap();
        assert_eq!(id.as_str(), COMMIT);
    }

    #[test]
    fn parse_short_fails() {
        let result = CommitId::parse("24fca30");
        assert_eq!(
            result,
            Err(CommitIdError::InvalidLength {
                expected: 40,
                actual: 7
            })
        );
    }

    #[test]
    fn parse_uppercase_fails() {
        let upper = COMMIT.to_uppercase();
        let result = CommitId::parse(&upper);
        assert!(matches!(result, Err(CommitIdError::InvalidChar { char: 'F', position: 2 })));
    }

    #[test]
    fn is_commit_id_rejects_branch_names() {
        assert!(CommitId::is_commit_id(COMMIT));
        assert!(!CommitId::is_commit_id("branch"));
        assert!(!CommitId::is_commit_id(&"g".repeat(40)));
        assert!(!CommitId::is_commit_id(&"a".repeat(41)));
    }
}
