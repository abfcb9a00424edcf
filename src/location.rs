//! The repository location record shared by every codec.

use crate::builder::resolve_commit_id;
use crate::commit_id::CommitId;
use crate::error::BuilderError;
use crate::position::{Position, Range, Selection};
use crate::repo_name::RepoName;
use crate::view_state::ViewState;

/// A location inside a versioned repository.
///
/// A location names a repository and optionally a revision, a resolved
/// commit, a file, coordinates inside that file, and a view state. Use
/// [`RepoLocation::parse`] for repo-URIs, [`crate::parse_pretty_url`] for
/// pretty URLs, or [`crate::RepoLocationBuilder`] to assemble one from known
/// facts.
///
/// Coordinates and view state only exist alongside a file path; every
/// constructor in this crate upholds that.
///
/// # Examples
///
/// ```
/// use repo_uri::RepoLocation;
///
/// let loc = RepoLocation::parse("git://github.com/gorilla/mux?branch#mux.go:3,5").unwrap();
/// assert_eq!(loc.repo_name().as_str(), "github.com/gorilla/mux");
/// assert_eq!(loc.rev(), Some("branch"));
/// assert_eq!(loc.file_path(), Some("mux.go"));
/// assert_eq!(loc.position().map(|p| p.line()), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoLocation {
    pub(crate) repo_name: RepoName,
    pub(crate) rev: Option<String>,
    pub(crate) commit_id: Option<CommitId>,
    pub(crate) file_path: Option<String>,
    pub(crate) selection: Option<Selection>,
    pub(crate) view_state: Option<ViewState>,
}

impl RepoLocation {
    /// Creates a location pointing at the default branch of a repository.
    #[must_use]
    pub const fn new(repo_name: RepoName) -> Self {
        Self {
            repo_name,
            rev: None,
            commit_id: None,
            file_path: None,
            selection: None,
            view_state: None,
        }
    }

    /// Returns the repository name.
    #[must_use]
    pub const fn repo_name(&self) -> &RepoName {
        &self.repo_name
    }

    /// Returns the revision, if present.
    ///
    /// An empty revision is possible when set explicitly; serializers treat
    /// it as absent.
    #[must_use]
    pub fn rev(&self) -> Option<&str> {
        self.rev.as_deref()
    }

    /// Returns the resolved commit ID, if known.
    #[must_use]
    pub const fn commit_id(&self) -> Option<&CommitId> {
        self.commit_id.as_ref()
    }

    /// Returns the repository-relative file path, if present.
    #[must_use]
    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    /// Returns the in-file coordinates, if present.
    #[must_use]
    pub const fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Returns the position, if the coordinates are a single position.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.selection.as_ref().and_then(Selection::position)
    }

    /// Returns the range, if the coordinates are a range.
    #[must_use]
    pub fn range(&self) -> Option<Range> {
        self.selection.as_ref().and_then(Selection::range)
    }

    /// Returns the view state, if present.
    #[must_use]
    pub const fn view_state(&self) -> Option<&ViewState> {
        self.view_state.as_ref()
    }

    /// Returns the revision to print in URLs: a non-empty `rev`.
    pub(crate) fn display_rev(&self) -> Option<&str> {
        self.rev.as_deref().filter(|rev| !rev.is_empty())
    }

    /// Returns a copy pointing at the same file with new coordinates.
    ///
    /// Returns `None` when the location has no file path.
    ///
    /// # Examples
    ///
    /// ```
    /// use repo_uri::{Position, RepoLocation};
    ///
    /// let loc = RepoLocation::parse("git://github.com/gorilla/mux#mux.go").unwrap();
    /// let moved = loc.with_selection(Position::new(10, Some(2)).unwrap()).unwrap();
    /// assert_eq!(moved.to_repo_uri(), "git://github.com/gorilla/mux#mux.go:10,2");
    /// ```
    #[must_use]
    pub fn with_selection(&self, selection: impl Into<Selection>) -> Option<Self> {
        self.file_path.as_ref()?;
        Some(Self {
            selection: Some(selection.into()),
            ..self.clone()
        })
    }

    /// Returns a copy with the given view state.
    ///
    /// Returns `None` when the location has no file path.
    #[must_use]
    pub fn with_view_state(&self, view_state: ViewState) -> Option<Self> {
        self.file_path.as_ref()?;
        Some(Self {
            view_state: Some(view_state),
            ..self.clone()
        })
    }

    /// Returns a copy pinned to a resolved commit.
    ///
    /// The revision is kept so pretty URLs still show the name the user
    /// navigated with.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::CommitMismatch`] if the revision is itself a
    /// commit ID that differs from `commit_id`.
    ///
    /// # Examples
    ///
    /// ```
    /// use repo_uri::{CommitId, RepoLocation};
    ///
    /// let commit = CommitId::parse("24fca303ac6da784b9e8269f724ddeb0b2eea5e7")?;
    /// let loc = RepoLocation::parse("git://github.com/gorilla/mux?branch")?.with_commit_id(commit)?;
    /// assert_eq!(loc.rev(), Some("branch"));
    ///
    /// let other = CommitId::parse("0000000000000000000000000000000000000001")?;
    /// let pinned = RepoLocation::parse("git://github.com/gorilla/mux?24fca303ac6da784b9e8269f724ddeb0b2eea5e7")?;
    /// assert!(pinned.with_commit_id(other).is_err());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn with_commit_id(&self, commit_id: CommitId) -> Result<Self, BuilderError> {
        let commit_id = resolve_commit_id(self.rev.as_deref(), Some(commit_id))?;
        Ok(Self {
            commit_id,
            ..self.clone()
        })
    }

    /// Returns a copy pointing at the repository root of the same revision.
    #[must_use]
    pub fn without_file(&self) -> Self {
        Self {
            file_path: None,
            selection: None,
            view_state: None,
            ..self.clone()
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoLocationRepr {
    repo_name: RepoName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rev: Option<String>,
    #[serde(rename = "commitID", default, skip_serializing_if = "Option::is_none")]
    commit_id: Option<CommitId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    range: Option<Range>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    view_state: Option<ViewState>,
}

#[cfg(feature = "serde")]
impl serde::Serialize for RepoLocation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let repr = RepoLocationRepr {
            repo_name: self.repo_name.clone(),
            rev: self.rev.clone(),
            commit_id: self.commit_id.clone(),
            file_path: self.file_path.clone(),
            position: self.position(),
            range: self.range(),
            view_state: self.view_state.clone(),
        };
        serde::Serialize::serialize(&repr, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RepoLocation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = <RepoLocationRepr as serde::Deserialize>::deserialize(deserializer)?;
        let selection = match (repr.position, repr.range) {
            (Some(_), Some(_)) => {
                return Err(serde::de::Error::custom(BuilderError::ConflictingSelection));
            }
            (Some(position), None) => Some(Selection::Position(position)),
            (None, Some(range)) => Some(Selection::Range(range)),
            (None, None) => None,
        };
        crate::builder::assemble(
            repr.repo_name,
            repr.rev,
            repr.commit_id,
            repr.file_path,
            selection,
            repr.view_state,
        )
        .map_err(serde::de::Error::custom)
    }
}
