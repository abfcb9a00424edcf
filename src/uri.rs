//! Repo-URI codec: `git://repo?rev#path:coord`.

use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::commit_id::CommitId;
use crate::constants::SCHEME;
use crate::error::{ParseError, ParseErrorKind};
use crate::location::RepoLocation;
use crate::position::{Selection, parse_selection, write_selection};
use crate::repo_name::RepoName;

/// Separator between line and character in repo-URI coordinates.
const COORD_SEP: char = ',';

impl RepoLocation {
    /// Parses a repo-URI.
    ///
    /// ```text
    /// uri   := "git://" repoName ["?" rev] ["#" filePath [":" coord]]
    /// coord := line ["," character] ["-" endLine ["," endCharacter]]
    /// ```
    ///
    /// A 40-character hex revision is also recorded as the commit ID. A
    /// `:` suffix that is not a complete coordinate stays part of the file
    /// path. Empty revisions and file paths are stripped.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The input is empty
    /// - The scheme is not "git://"
    /// - The repository name is empty
    ///
    /// # Examples
    ///
    /// ```
    /// use repo_uri::RepoLocation;
    ///
    /// let loc = RepoLocation::parse(
    ///     "git://github.com/gorilla/mux?24fca303ac6da784b9e8269f724ddeb0b2eea5e7#mux.go:3,5-6,9",
    /// ).unwrap();
    /// assert_eq!(loc.commit_id().map(|c| c.as_str()), loc.rev());
    /// let range = loc.range().unwrap();
    /// assert_eq!((range.start().line(), range.end().character()), (3, Some(9)));
    ///
    /// assert!(RepoLocation::parse("http://github.com/gorilla/mux").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_inner(input).map_err(|kind| ParseError {
            input: input.to_string(),
            kind,
        })
    }

    /// Serializes this location as a repo-URI.
    ///
    /// The revision slot holds the revision when it is non-empty, otherwise
    /// the commit ID. A location on a branch that is also pinned to a
    /// commit therefore serializes with the branch name, and the commit ID
    /// is dropped; use [`RepoLocation::text_document_uri`] for the
    /// commit-first form. The view state has no place in a repo-URI and is
    /// not written.
    ///
    /// # Examples
    ///
    /// ```
    /// use repo_uri::RepoLocationBuilder;
    ///
    /// let loc = RepoLocationBuilder::new()
    ///     .try_repo_name("github.com/gorilla/mux")?
    ///     .rev("branch")
    ///     .file_path("mux.go")
    ///     .build()?;
    /// assert_eq!(loc.to_repo_uri(), "git://github.com/gorilla/mux?branch#mux.go");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn to_repo_uri(&self) -> String {
        let mut result = format!("{SCHEME}://{}", self.repo_name);

        if let Some(rev) = self.display_rev().or(self.commit_id.as_deref()) {
            result.push('?');
            result.push_str(rev);
        }

        if let Some(path) = &self.file_path {
            result.push('#');
            result.push_str(path);
            if let Some(selection) = &self.selection {
                result.push(':');
                write_selection(&mut result, selection, COORD_SEP);
            }
        }

        result
    }

    fn parse_inner(input: &str) -> Result<Self, ParseErrorKind> {
        if input.is_empty() {
            return Err(ParseErrorKind::Empty);
        }

        let scheme_prefix = format!("{SCHEME}://");
        let Some(rest) = input.strip_prefix(&scheme_prefix) else {
            let found = input.split_once("://").map(|(scheme, _)| scheme.to_string());
            return Err(ParseErrorKind::InvalidScheme { found });
        };

        let (rest, file) = match rest.split_once('#') {
            Some((rest, file)) => (rest, Some(file)),
            None => (rest, None),
        };
        let (repo, rev) = match rest.split_once('?') {
            Some((repo, rev)) => (repo, Some(rev)),
            None => (rest, None),
        };

        let repo_name = RepoName::parse(repo).map_err(ParseErrorKind::InvalidRepoName)?;

        let rev = rev.filter(|rev| !rev.is_empty());
        let commit_id = rev.and_then(|rev| CommitId::parse(rev).ok());

        let (file_path, selection) = match file.filter(|file| !file.is_empty()) {
            Some(file) => {
                let (path, selection) = Self::split_coordinates(file);
                (Some(path.to_string()), selection)
            }
            None => (None, None),
        };

        Ok(Self {
            repo_name,
            rev: rev.map(str::to_string),
            commit_id,
            file_path,
            selection,
            view_state: None,
        })
    }

    /// Splits `path[:coord]` at the first `:` followed by a complete
    /// coordinate.
    fn split_coordinates(file: &str) -> (&str, Option<Selection>) {
        for (idx, _) in file.match_indices(':').filter(|(idx, _)| *idx > 0) {
            if let Some(selection) = parse_selection(&file[idx + 1..], COORD_SEP) {
                return (&file[..idx], Some(selection));
            }
        }
        if file.contains(':') {
            trace!("no coordinate suffix in repo-URI file '{file}', keeping it in the path");
        }
        (file, None)
    }
}

impl fmt::Display for RepoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_repo_uri())
    }
}

impl FromStr for RepoLocation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for RepoLocation {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}
