//! Pretty URLs: `/repo[@rev]/-/blob/path[#hash]`.

use log::trace;

use crate::commit_id::CommitId;
use crate::constants::BLOB_MARKER;
use crate::error::{ParseError, ParseErrorKind};
use crate::hash::{HashCoords, parse_hash};
use crate::location::RepoLocation;
use crate::repo_name::RepoName;

impl RepoLocation {
    /// Returns the hash fragment coordinates for this location.
    #[must_use]
    pub fn hash_coords(&self) -> HashCoords {
        HashCoords::from_parts(self.selection.as_ref(), self.view_state.as_ref())
    }

    /// Builds the pretty URL of the file this location points into.
    ///
    /// The revision is included when it is non-empty; the commit ID is
    /// never shown. Coordinates and view state become the hash fragment,
    /// which is omitted when neither is present. Returns `None` when there
    /// is no file path.
    ///
    /// # Examples
    ///
    /// ```
    /// use repo_uri::RepoLocation;
    ///
    /// let loc = RepoLocation::parse("git://github.com/gorilla/mux?branch#mux.go").unwrap();
    /// assert_eq!(
    ///     loc.to_pretty_blob_url().as_deref(),
    ///     Some("/github.com/gorilla/mux@branch/-/blob/mux.go"),
    /// );
    /// ```
    #[must_use]
    pub fn to_pretty_blob_url(&self) -> Option<String> {
        let file_path = self.file_path.as_deref()?;
        let mut result = self.pretty_repo_path();
        result.push('/');
        result.push_str(BLOB_MARKER);
        result.push('/');
        result.push_str(file_path);

        let hash = self.hash_coords().to_pretty_hash();
        if !hash.is_empty() {
            result.push('#');
            result.push_str(&hash);
        }

        Some(result)
    }

    /// Builds the pretty URL of this location: the blob URL when a file
    /// is present, otherwise the repository URL `/repo[@rev]`.
    #[must_use]
    pub fn to_pretty_url(&self) -> String {
        self.to_pretty_blob_url().unwrap_or_else(|| self.pretty_repo_path())
    }

    fn pretty_repo_path(&self) -> String {
        match self.display_rev() {
            Some(rev) => format!("/{}@{rev}", self.repo_name),
            None => format!("/{}", self.repo_name),
        }
    }

    /// Parses a pretty URL. See [`parse_pretty_url`].
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the URL is empty, lacks the leading `/`, or
    /// has an empty repository name.
    pub fn parse_pretty_url(url: &str) -> Result<Self, ParseError> {
        parse_pretty_url(url)
    }
}

/// Builds the pretty blob URL of a location.
///
/// Equivalent to [`RepoLocation::to_pretty_blob_url`].
#[must_use]
pub fn to_pretty_blob_url(location: &RepoLocation) -> Option<String> {
    location.to_pretty_blob_url()
}

/// Parses a pretty URL back into a location.
///
/// ```text
/// url := "/" repoName ["@" rev] ["/-/blob/" filePath] ["#" hash]
/// ```
///
/// The hash fragment is read leniently: an unrecognized fragment leaves
/// the location without coordinates instead of failing.
///
/// # Errors
///
/// Returns `ParseError` if the URL is empty, lacks the leading `/`, or has
/// an empty repository name.
///
/// # Examples
///
/// ```
/// use repo_uri::parse_pretty_url;
///
/// let loc = parse_pretty_url("/github.com/gorilla/mux@branch/-/blob/mux.go#L1:1$references").unwrap();
/// assert_eq!(loc.rev(), Some("branch"));
/// assert_eq!(loc.file_path(), Some("mux.go"));
/// assert_eq!(loc.view_state().map(|v| v.as_str()), Some("references"));
/// ```
pub fn parse_pretty_url(url: &str) -> Result<RepoLocation, ParseError> {
    parse_pretty_url_inner(url).map_err(|kind| ParseError {
        input: url.to_string(),
        kind,
    })
}

fn parse_pretty_url_inner(url: &str) -> Result<RepoLocation, ParseErrorKind> {
    if url.is_empty() {
        return Err(ParseErrorKind::Empty);
    }

    let (path, hash) = match url.split_once('#') {
        Some((path, hash)) => (path, Some(hash)),
        None => (url, None),
    };

    let path = path.strip_prefix('/').ok_or(ParseErrorKind::MissingComponent {
        component: "leading slash",
    })?;

    let blob_marker = format!("/{BLOB_MARKER}/");
    let (repo_rev, file_path) = match path.split_once(&blob_marker) {
        Some((repo_rev, file_path)) => (repo_rev, Some(file_path)),
        None => (path.trim_end_matches('/'), None),
    };

    let (repo, rev) = match repo_rev.split_once('@') {
        Some((repo, rev)) => (repo, Some(rev)),
        None => (repo_rev, None),
    };

    let repo_name = RepoName::parse(repo).map_err(ParseErrorKind::InvalidRepoName)?;
    let rev = rev.filter(|rev| !rev.is_empty());
    let commit_id = rev.and_then(|rev| CommitId::parse(rev).ok());
    let file_path = file_path.filter(|file_path| !file_path.is_empty());

    let coords = match (file_path, hash) {
        (Some(_), Some(hash)) => parse_hash(hash),
        (None, Some(hash)) if !hash.is_empty() => {
            trace!("ignoring hash '{hash}' on a repository URL");
            HashCoords::default()
        }
        _ => HashCoords::default(),
    };

    Ok(RepoLocation {
        repo_name,
        rev: rev.map(str::to_string),
        commit_id,
        file_path: file_path.map(str::to_string),
        selection: coords.selection(),
        view_state: coords.view_state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::RepoLocationBuilder;
    use crate::position::Position;

    const COMMIT: &str = "24fca303ac6da784b9e8269f724ddeb0b2eea5e7";

    fn ctx() -> RepoLocation {
        RepoLocationBuilder::new()
            .try_repo_name("github.com/gorilla/mux")
            .unwrap()
            .rev("")
            .try_commit_id(COMMIT)
            .unwrap()
            .file_path("mux.go")
            .build()
            .unwrap()
    }

    fn line_char() -> Position {
        Position::new(1, Some(1)).unwrap()
    }

    #[test]
    fn formats_url_for_empty_rev() {
        assert_eq!(
            ctx().to_pretty_blob_url().as_deref(),
            Some("/github.com/gorilla/mux/-/blob/mux.go")
        );
    }

    #[test]
    fn formats_url_for_absent_rev() {
        let loc = RepoLocation::parse("git://github.com/gorilla/mux#mux.go").unwrap();
        assert_eq!(
            to_pretty_blob_url(&loc).as_deref(),
            Some("/github.com/gorilla/mux/-/blob/mux.go")
        );
    }

    #[test]
    fn formats_url_for_specified_rev() {
        let loc = RepoLocation::parse("git://github.com/gorilla/mux?branch#mux.go").unwrap();
        assert_eq!(
            loc.to_pretty_blob_url().as_deref(),
            Some("/github.com/gorilla/mux@branch/-/blob/mux.go")
        );
    }

    #[test]
    fn formats_url_with_position() {
        let loc = ctx().with_selection(line_char()).unwrap();
        assert_eq!(
            loc.to_pretty_blob_url().as_deref(),
            Some("/github.com/gorilla/mux/-/blob/mux.go#L1:1")
        );
    }

    #[test]
    fn formats_url_with_view_state() {
        let loc = ctx()
            .with_selection(line_char())
            .and_then(|loc| loc.with_view_state("references".parse().unwrap()))
            .unwrap();
        assert_eq!(
            loc.to_pretty_blob_url().as_deref(),
            Some("/github.com/gorilla/mux/-/blob/mux.go#L1:1&tab=references")
        );
    }

    #[test]
    fn formats_url_with_range() {
        let loc = RepoLocation::parse("git://a/b#c.go:3-7").unwrap();
        assert_eq!(loc.to_pretty_blob_url().as_deref(), Some("/a/b/-/blob/c.go#L3-7"));
    }

    #[test]
    fn blob_url_requires_file() {
        let loc = RepoLocation::parse("git://github.com/gorilla/mux?branch").unwrap();
        assert_eq!(loc.to_pretty_blob_url(), None);
        assert_eq!(loc.to_pretty_url(), "/github.com/gorilla/mux@branch");
    }

    #[test]
    fn parse_repo_url() {
        let loc = parse_pretty_url("/github.com/gorilla/mux").unwrap();
        assert_eq!(loc.repo_name().as_str(), "github.com/gorilla/mux");
        assert!(loc.rev().is_none());
        assert!(loc.file_path().is_none());
    }

    #[test]
    fn parse_blob_url_with_commit_rev() {
        let loc = parse_pretty_url(&format!("/a/b@{COMMIT}/-/blob/dir/c.go#L3:4-5:6")).unwrap();
        assert_eq!(loc.rev(), Some(COMMIT));
        assert_eq!(loc.commit_id().map(CommitId::as_str), Some(COMMIT));
        assert_eq!(loc.file_path(), Some("dir/c.go"));
        assert_eq!(loc.range().map(|r| r.end().character()), Some(Some(6)));
    }

    #[test]
    fn parse_rev_with_slashes() {
        let loc = parse_pretty_url("/a/b@feature/x/-/blob/c.go").unwrap();
        assert_eq!(loc.rev(), Some("feature/x"));
        assert_eq!(loc.file_path(), Some("c.go"));
    }

    #[test]
    fn parse_ignores_unrecognized_hash() {
        let loc = parse_pretty_url("/a/b/-/blob/c.go#L1:2-3").unwrap();
        assert_eq!(loc.file_path(), Some("c.go"));
        assert!(loc.selection().is_none());
    }

    #[test]
    fn parse_rejects_missing_slash_and_empty_repo() {
        assert_eq!(
            parse_pretty_url("a/b").map_err(|e| e.kind),
            Err(ParseErrorKind::MissingComponent {
                component: "leading slash"
            })
        );
        assert!(parse_pretty_url("/").is_err());
        assert!(parse_pretty_url("/@main").is_err());
        assert!(matches!(
            parse_pretty_url(""),
            Err(ParseError {
                kind: ParseErrorKind::Empty,
                ..
            })
        ));
    }

    #[test]
    fn pretty_url_roundtrip() {
        for url in [
            "/github.com/gorilla/mux",
            "/github.com/gorilla/mux@branch",
            "/github.com/gorilla/mux@branch/-/blob/mux.go",
            "/github.com/gorilla/mux/-/blob/mux.go#L1:1",
            "/github.com/gorilla/mux/-/blob/mux.go#L1:1&tab=references",
            "/github.com/gorilla/mux/-/blob/mux.go#L2-9",
            "/github.com/gorilla/mux/-/blob/mux.go#tab=impl",
        ] {
            let loc = RepoLocation::parse_pretty_url(url).unwrap();
            assert_eq!(loc.to_pretty_url(), url);
        }
    }

    #[test]
    fn legacy_hash_normalizes_to_modern() {
        let loc = parse_pretty_url("/a/b/-/blob/c.go#L1:1$references").unwrap();
        assert_eq!(loc.to_pretty_url(), "/a/b/-/blob/c.go#L1:1&tab=references");
    }

    #[test]
    fn host_port_repo_round_trips() {
        let loc = RepoLocation::parse("git://host:8080/a/b?v1.0#c.go:2").unwrap();
        let url = loc.to_pretty_url();
        assert_eq!(url, "/host:8080/a/b@v1.0/-/blob/c.go#L2");
        assert_eq!(parse_pretty_url(&url).unwrap(), loc);
    }

    #[test]
    fn rev_keeps_later_at_signs() {
        let loc = parse_pretty_url("/a/b@HEAD@{1}/-/blob/c.go").unwrap();
        assert_eq!(loc.repo_name().as_str(), "a/b");
        assert_eq!(loc.rev(), Some("HEAD@{1}"));
    }
}
