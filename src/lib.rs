//! Codecs for addressing locations inside versioned repositories.
//!
//! A location names a repository, optionally a revision, a file, a position
//! or range in that file, and a view state such as "references". This crate
//! converts locations to and from the string forms used to pass them around:
//!
//! | Form | Example | Used by |
//! |------|---------|---------|
//! | Repo-URI | `git://github.com/gorilla/mux?branch#mux.go:3,5` | language services |
//! | Pretty URL | `/github.com/gorilla/mux@branch/-/blob/mux.go#L3:5` | address bar, router |
//! | Search query | `q=repo:gorilla/mux+route` | search page |
//!
//! All functions are pure; nothing here touches the network or checks that
//! a repository, revision or file exists.
//!
//! # Quick Start
//!
//! ```rust
//! use repo_uri::{RepoLocation, parse_hash};
//!
//! let loc = RepoLocation::parse("git://github.com/gorilla/mux?branch#mux.go:3,5").unwrap();
//! assert_eq!(loc.file_path(), Some("mux.go"));
//! assert_eq!(
//!     loc.to_pretty_blob_url().as_deref(),
//!     Some("/github.com/gorilla/mux@branch/-/blob/mux.go#L3:5"),
//! );
//!
//! let coords = parse_hash("#L3:5$references");
//! assert_eq!(coords.line, Some(3));
//! assert_eq!(coords.to_pretty_hash(), "L3:5&tab=references");
//! ```
//!
//! # Strictness
//!
//! Repo-URIs are built by programs, so [`RepoLocation::parse`] reports a
//! [`ParseError`] for a wrong scheme or an empty repository name. Hash
//! fragments come from URLs people edit by hand, so [`parse_hash`] never
//! fails and returns an empty [`HashCoords`] for anything it does not fully
//! recognize.
//!
//! # Line Numbers
//!
//! Lines and characters are 1-based everywhere except in the
//! [`ProtocolPosition`] records sent to a language service. Convert with
//! [`ProtocolPosition::from_one_based`].

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod builder;
mod commit_id;
mod constants;
mod error;
mod hash;
mod location;
mod position;
pub mod prelude;
mod pretty;
mod protocol;
mod repo_name;
mod search;
mod uri;
mod view_state;

pub use builder::{Empty, HasFile, HasRepo, RepoLocationBuilder};
pub use commit_id::CommitId;
pub use constants::{
    BLOB_MARKER, COMMIT_ID_LENGTH, LEGACY_VIEW_STATE_SEPARATOR, SCHEME, SEARCH_QUERY_PARAM,
    VIEW_STATE_PARAM,
};
pub use error::{
    BuilderError, CommitIdError, ParseError, ParseErrorKind, PositionError, RepoNameError,
    ViewStateError,
};
pub use hash::{HashCoords, parse_hash, to_pretty_hash};
pub use location::RepoLocation;
pub use position::{Position, Range, Selection};
pub use pretty::{parse_pretty_url, to_pretty_blob_url};
pub use protocol::{
    ProtocolPosition, ProtocolRange, TextDocumentIdentifier, TextDocumentPositionParams,
};
pub use repo_name::RepoName;
pub use search::{build_search_url_query, parse_search_url_query};
pub use view_state::ViewState;
