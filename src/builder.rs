//! Typestate builder for constructing [`RepoLocation`] instances.
//!
//! The builder tracks in its type whether a repository and a file have been
//! set, so coordinates and view states can only be attached to a file.

use crate::commit_id::CommitId;
use crate::error::{BuilderError, CommitIdError, RepoNameError, ViewStateError};
use crate::location::RepoLocation;
use crate::position::{Position, Range, Selection};
use crate::repo_name::RepoName;
use crate::view_state::ViewState;

/// Marker: no repository set yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

/// State: the repository has been set.
#[derive(Debug, Clone)]
pub struct HasRepo {
    repo_name: RepoName,
}

/// State: the repository and a file have been set.
#[derive(Debug, Clone)]
pub struct HasFile {
    repo_name: RepoName,
    file_path: String,
}

/// A typestate builder for constructing [`RepoLocation`] instances.
///
/// The revision and commit ID can be set in any state. Coordinates and the
/// view state are only available once a file path has been set.
///
/// # Examples
///
/// ```
/// use repo_uri::{Position, RepoLocationBuilder};
///
/// let loc = RepoLocationBuilder::new()
///     .try_repo_name("github.com/gorilla/mux")?
///     .rev("branch")
///     .file_path("mux.go")
///     .position(Position::new(1, Some(1))?)
///     .try_view_state("references")?
///     .build()?;
///
/// assert_eq!(
///     loc.to_pretty_blob_url().as_deref(),
///     Some("/github.com/gorilla/mux@branch/-/blob/mux.go#L1:1&tab=references"),
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Compile-Time Safety
///
/// ```compile_fail
/// use repo_uri::{Position, RepoLocationBuilder};
///
/// // Error: a position needs a file to point into
/// let loc = RepoLocationBuilder::new()
///     .try_repo_name("github.com/gorilla/mux")
///     .unwrap()
///     .position(Position::at_line(1).unwrap());
/// ```
///
/// ```compile_fail
/// use repo_uri::RepoLocationBuilder;
///
/// // Error: cannot build without a repository
/// let loc = RepoLocationBuilder::new().rev("main").build();
/// ```
#[derive(Debug, Clone)]
pub struct RepoLocationBuilder<State = Empty> {
    state: State,
    rev: Option<String>,
    commit_id: Option<CommitId>,
    selection: Option<Selection>,
    view_state: Option<ViewState>,
}

impl RepoLocationBuilder<Empty> {
    /// Creates a new builder in the initial state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: Empty,
            rev: None,
            commit_id: None,
            selection: None,
            view_state: None,
        }
    }

    /// Sets the repository and advances to the [`HasRepo`] state.
    #[must_use]
    pub fn repo_name(self, repo_name: RepoName) -> RepoLocationBuilder<HasRepo> {
        RepoLocationBuilder {
            state: HasRepo { repo_name },
            rev: self.rev,
            commit_id: self.commit_id,
            selection: self.selection,
            view_state: self.view_state,
        }
    }

    /// Parses and sets the repository name from a string.
    ///
    /// # Errors
    ///
    /// Returns [`RepoNameError`] if the string is not a valid repository name.
    pub fn try_repo_name(self, s: &str) -> Result<RepoLocationBuilder<HasRepo>, RepoNameError> {
        let repo_name = RepoName::parse(s)?;
        Ok(self.repo_name(repo_name))
    }
}

impl Default for RepoLocationBuilder<Empty> {
    fn default() -> Self {
        Self::new()
    }
}

impl RepoLocationBuilder<HasRepo> {
    /// Sets the file path and advances to the [`HasFile`] state.
    #[must_use]
    pub fn file_path(self, file_path: impl Into<String>) -> RepoLocationBuilder<HasFile> {
        RepoLocationBuilder {
            state: HasFile {
                repo_name: self.state.repo_name,
                file_path: file_path.into(),
            },
            rev: self.rev,
            commit_id: self.commit_id,
            selection: self.selection,
            view_state: self.view_state,
        }
    }

    /// Builds a location pointing at the repository root.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::CommitMismatch`] if the revision is a commit
    /// ID that differs from the explicit commit ID, or
    /// [`BuilderError::InvalidRev`] if the revision contains `#`.
    pub fn build(self) -> Result<RepoLocation, BuilderError> {
        assemble(
            self.state.repo_name,
            self.rev,
            self.commit_id,
            None,
            None,
            None,
        )
    }
}

impl RepoLocationBuilder<HasFile> {
    /// Sets the in-file coordinates. If called multiple times, the last
    /// value wins.
    #[must_use]
    pub fn selection(mut self, selection: impl Into<Selection>) -> Self {
        self.selection = Some(selection.into());
        self
    }

    /// Points the location at a single position.
    #[must_use]
    pub fn position(self, position: Position) -> Self {
        self.selection(position)
    }

    /// Points the location at a range.
    #[must_use]
    pub fn range(self, range: Range) -> Self {
        self.selection(range)
    }

    /// Sets the view state.
    #[must_use]
    pub fn view_state(mut self, view_state: ViewState) -> Self {
        self.view_state = Some(view_state);
        self
    }

    /// Parses and sets the view state from a string.
    ///
    /// # Errors
    ///
    /// Returns [`ViewStateError`] if the string is not a valid view state.
    pub fn try_view_state(self, s: &str) -> Result<Self, ViewStateError> {
        let view_state = ViewState::parse(s)?;
        Ok(self.view_state(view_state))
    }

    /// Builds a location pointing into the file.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::CommitMismatch`] if the revision is a commit
    /// ID that differs from the explicit commit ID,
    /// [`BuilderError::InvalidRev`] if the revision contains `#`, or
    /// [`BuilderError::EmptyFilePath`] if the file path is empty.
    pub fn build(self) -> Result<RepoLocation, BuilderError> {
        assemble(
            self.state.repo_name,
            self.rev,
            self.commit_id,
            Some(self.state.file_path),
            self.selection,
            self.view_state,
        )
    }
}

/// Methods available in every state.
impl<State> RepoLocationBuilder<State> {
    /// Sets the revision. A revision shaped like a commit ID also sets the
    /// commit ID when the location is built.
    #[must_use]
    pub fn rev(mut self, rev: impl Into<String>) -> Self {
        self.rev = Some(rev.into());
        self
    }

    /// Sets the resolved commit ID.
    #[must_use]
    pub fn commit_id(mut self, commit_id: CommitId) -> Self {
        self.commit_id = Some(commit_id);
        self
    }

    /// Parses and sets the commit ID from a string.
    ///
    /// # Errors
    ///
    /// Returns [`CommitIdError`] if the string is not a 40-character hex
    /// commit ID.
    pub fn try_commit_id(self, s: &str) -> Result<Self, CommitIdError> {
        let commit_id = CommitId::parse(s)?;
        Ok(self.commit_id(commit_id))
    }
}

/// Assembles a location from parts, deriving the commit ID from a
/// commit-shaped revision.
pub(crate) fn assemble(
    repo_name: RepoName,
    rev: Option<String>,
    commit_id: Option<CommitId>,
    file_path: Option<String>,
    selection: Option<Selection>,
    view_state: Option<ViewState>,
) -> Result<RepoLocation, BuilderError> {
    if let Some(rev) = rev.as_deref().filter(|rev| rev.contains('#')) {
        return Err(BuilderError::InvalidRev {
            rev: rev.to_string(),
        });
    }

    match file_path.as_deref() {
        Some("") => return Err(BuilderError::EmptyFilePath),
        None if selection.is_some() || view_state.is_some() => {
            return Err(BuilderError::MissingFilePath);
        }
        _ => {}
    }

    let commit_id = resolve_commit_id(rev.as_deref(), commit_id)?;

    Ok(RepoLocation {
        repo_name,
        rev,
        commit_id,
        file_path,
        selection,
        view_state,
    })
}

/// Returns the commit ID a location with this revision must carry.
///
/// A commit-shaped revision is its own commit ID and must agree with any
/// explicit one.
pub(crate) fn resolve_commit_id(
    rev: Option<&str>,
    commit_id: Option<CommitId>,
) -> Result<Option<CommitId>, BuilderError> {
    let derived = rev.and_then(|rev| CommitId::parse(rev).ok());
    match (derived, commit_id) {
        (Some(derived), Some(explicit)) if derived != explicit => Err(BuilderError::CommitMismatch {
            rev: derived.to_string(),
            commit_id: explicit.to_string(),
        }),
        (Some(derived), _) => Ok(Some(derived)),
        (None, explicit) => Ok(explicit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMIT: &str = "24fca303ac6da784b9e8269f724ddeb0b2eea5e7";
    const OTHER_COMMIT: &str = "0000000000000000000000000000000000000001";

    #[test]
    fn build_repo_only() {
        let loc = RepoLocationBuilder::new()
            .try_repo_name("github.com/gorilla/mux")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(loc.to_repo_uri(), "git://github.com/gorilla/mux");
    }

    #[test]
    fn rev_can_be_set_before_repo() {
        let loc = RepoLocationBuilder::new()
            .rev("branch")
            .try_repo_name("github.com/gorilla/mux")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(loc.rev(), Some("branch"));
    }

    #[test]
    fn commit_shaped_rev_sets_commit_id() {
        let loc = RepoLocationBuilder::new()
            .try_repo_name("github.com/gorilla/mux")
            .unwrap()
            .rev(COMMIT)
            .build()
            .unwrap();
        assert_eq!(loc.commit_id().map(CommitId::as_str), Some(COMMIT));
    }

    #[test]
    fn branch_rev_keeps_explicit_commit_id() {
        let loc = RepoLocationBuilder::new()
            .try_repo_name("github.com/gorilla/mux")
            .unwrap()
            .rev("branch")
            .try_commit_id(COMMIT)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(loc.rev(), Some("branch"));
        assert_eq!(loc.commit_id().map(CommitId::as_str), Some(COMMIT));
    }

    #[test]
    fn mismatched_commit_fails() {
        let result = RepoLocationBuilder::new()
            .try_repo_name("github.com/gorilla/mux")
            .unwrap()
            .rev(COMMIT)
            .try_commit_id(OTHER_COMMIT)
            .unwrap()
            .build();
        assert!(matches!(result, Err(BuilderError::CommitMismatch { .. })));
    }

    #[test]
    fn file_with_range_and_view_state() {
        let range = Range::new(
            Position::new(1, Some(2)).unwrap(),
            Position::new(3, Some(4)).unwrap(),
        )
        .unwrap();
        let loc = RepoLocationBuilder::new()
            .try_repo_name("a/b")
            .unwrap()
            .file_path("c.go")
            .range(range)
            .try_view_state("references")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(loc.range(), Some(range));
        assert_eq!(loc.view_state().map(ViewState::as_str), Some("references"));
    }

    #[test]
    fn last_selection_wins() {
        let loc = RepoLocationBuilder::new()
            .try_repo_name("a/b")
            .unwrap()
            .file_path("c.go")
            .position(Position::at_line(1).unwrap())
            .position(Position::at_line(9).unwrap())
            .build()
            .unwrap();
        assert_eq!(loc.position(), Some(Position::at_line(9).unwrap()));
    }

    #[test]
    fn try_methods_propagate_errors() {
        assert!(RepoLocationBuilder::new().try_repo_name("").is_err());
        assert!(RepoLocationBuilder::new().try_commit_id("abc").is_err());
        let builder = RepoLocationBuilder::new()
            .try_repo_name("a/b")
            .unwrap()
            .file_path("c.go");
        assert!(builder.try_view_state("").is_err());
    }

    #[test]
    fn assemble_rejects_coordinates_without_file() {
        let result = assemble(
            RepoName::parse("a/b").unwrap(),
            None,
            None,
            None,
            Some(Position::at_line(1).unwrap().into()),
            None,
        );
        assert_eq!(result, Err(BuilderError::MissingFilePath));
    }

    #[test]
    fn rev_with_file_delimiter_fails() {
        let result = RepoLocationBuilder::new()
            .try_repo_name("a/b")
            .unwrap()
            .rev("x#y")
            .file_path("c.go")
            .build();
        assert_eq!(
            result,
            Err(BuilderError::InvalidRev {
                rev: "x#y".to_string()
            })
        );
    }

    #[test]
    fn empty_file_path_fails() {
        let result = RepoLocationBuilder::new()
            .try_repo_name("a/b")
            .unwrap()
            .file_path("")
            .position(Position::at_line(1).unwrap())
            .build();
        assert_eq!(result, Err(BuilderError::EmptyFilePath));
    }

    #[test]
    fn empty_rev_is_allowed() {
        let loc = RepoLocationBuilder::new()
            .try_repo_name("a/b")
            .unwrap()
            .rev("")
            .build()
            .unwrap();
        assert_eq!(loc.to_repo_uri(), "git://a/b");
    }
}
