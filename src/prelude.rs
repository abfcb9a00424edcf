//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use repo_uri::prelude::*;
//!
//! let loc = RepoLocation::parse("git://github.com/gorilla/mux?branch#mux.go:3").unwrap();
//! assert_eq!(parse_hash("#L3"), loc.hash_coords());
//! assert_eq!(
//!     parse_hash(&format!("L3{LEGACY_VIEW_STATE_SEPARATOR}references")).view_state,
//!     parse_hash(&format!("L3&{VIEW_STATE_PARAM}=references")).view_state,
//! );
//! ```
//!
//! Builder state markers (`Empty`, `HasRepo`, `HasFile`) are left out as
//! they only appear in type positions.

pub use crate::{
    // Core types
    CommitId, HashCoords, Position, Range, RepoLocation, RepoName, Selection, ViewState,
    // Builder
    RepoLocationBuilder,
    // Protocol boundary
    ProtocolPosition, ProtocolRange, TextDocumentIdentifier, TextDocumentPositionParams,
    // Codecs
    build_search_url_query, parse_hash, parse_pretty_url, parse_search_url_query,
    to_pretty_blob_url, to_pretty_hash,
    // Errors
    BuilderError, CommitIdError, ParseError, ParseErrorKind, PositionError, RepoNameError,
    ViewStateError,
    // Constants
    BLOB_MARKER, COMMIT_ID_LENGTH, LEGACY_VIEW_STATE_SEPARATOR, SCHEME, SEARCH_QUERY_PARAM,
    VIEW_STATE_PARAM,
};
