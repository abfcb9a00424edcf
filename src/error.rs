//! Error types for repository location parsing.

use std::fmt;

/// Errors that can occur when parsing a repo-URI or pretty URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

/// Specific parsing error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input is empty
    Empty,
    /// Missing or invalid scheme (expected "git://")
    InvalidScheme {
        /// The scheme that was found, if any
        found: Option<String>,
    },
    /// Repository name parsing failed
    InvalidRepoName(RepoNameError),
    /// Missing required component
    MissingComponent {
        /// Name of the missing component
        component: &'static str,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse repository location '{}': ", self.input)?;
        match &self.kind {
            ParseErrorKind::Empty => write!(f, "input is empty"),
            ParseErrorKind::InvalidScheme { found } => match found {
                Some(s) => write!(f, "expected scheme 'git://', found '{s}'"),
                None => write!(f, "missing scheme; URI must start with 'git://'"),
            },
            ParseErrorKind::InvalidRepoName(e) => write!(f, "invalid repository name: {e}"),
            ParseErrorKind::MissingComponent { component } => {
                write!(f, "missing required component: {component}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors for repository name parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoNameError {
    /// Name is empty
    Empty,
    /// Name contains a URI delimiter
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
}

impl fmt::Display for RepoNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "repository name cannot be empty"),
            Self::InvalidChar { char, position } => {
                write!(
                    f,
                    "invalid character '{char}' at position {position}; '?' and '#' are reserved"
                )
            }
        }
    }
}

impl std::error::Error for RepoNameError {}

/// Errors for commit ID parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitIdError {
    /// Commit ID is not exactly 40 characters
    InvalidLength {
        /// Required length
        expected: usize,
        /// Actual length
        actual: usize,
    },
    /// Commit ID contains a character other than lowercase hex
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
}

impl fmt::Display for CommitIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { expected, actual } => {
                write!(f, "commit ID must be {expected} characters, found {actual}")
            }
            Self::InvalidChar { char, position } => {
                write!(
                    f,
                    "invalid character '{char}' at position {position}; only lowercase hex digits allowed"
                )
            }
        }
    }
}

impl std::error::Error for CommitIdError {}

/// Errors for view state parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStateError {
    /// View state is empty
    Empty,
    /// View state contains a hash fragment separator
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
}

impl fmt::Display for ViewStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "view state cannot be empty"),
            Self::InvalidChar { char, position } => {
                write!(
                    f,
                    "invalid character '{char}' at position {position}; '$', '&' and '#' are reserved"
                )
            }
        }
    }
}

impl std::error::Error for ViewStateError {}

/// Errors for position and range construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionError {
    /// Line numbers are 1-based
    ZeroLine,
    /// Character offsets are 1-based
    ZeroCharacter,
    /// Range start and end disagree on whether a character is present
    ShapeMismatch,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLine => write!(f, "line must be at least 1"),
            Self::ZeroCharacter => write!(f, "character must be at least 1"),
            Self::ShapeMismatch => write!(
                f,
                "range end must specify a character exactly when the start does"
            ),
        }
    }
}

impl std::error::Error for PositionError {}

/// Errors that can occur when building a [`crate::RepoLocation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// A commit-shaped revision disagrees with the explicit commit ID
    CommitMismatch {
        /// The revision that was set
        rev: String,
        /// The commit ID that was set
        commit_id: String,
    },
    /// Coordinates or a view state were given without a file path
    MissingFilePath,
    /// The file path is empty
    EmptyFilePath,
    /// The revision contains the repo-URI file delimiter `#`
    InvalidRev {
        /// The revision that was set
        rev: String,
    },
    /// Both a position and a range were given
    ConflictingSelection,
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommitMismatch { rev, commit_id } => {
                write!(
                    f,
                    "revision '{rev}' is a commit ID but differs from commit ID '{commit_id}'"
                )
            }
            Self::MissingFilePath => write!(f, "coordinates and view state require a file path"),
            Self::EmptyFilePath => write!(f, "file path cannot be empty"),
            Self::InvalidRev { rev } => write!(f, "revision '{rev}' cannot contain '#'"),
            Self::ConflictingSelection => {
                write!(f, "a location has either a position or a range, not both")
            }
        }
    }
}

impl std::error::Error for BuilderError {}
