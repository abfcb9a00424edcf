//! Constants for repository location encodings.

/// The repo-URI scheme.
pub const SCHEME: &str = "git";

/// Length of a full hexadecimal commit ID.
pub const COMMIT_ID_LENGTH: usize = 40;

/// Path marker separating the repository from the file in a pretty blob URL.
pub const BLOB_MARKER: &str = "-/blob";

/// Hash fragment parameter carrying the view state in the modern syntax.
pub const VIEW_STATE_PARAM: &str = "tab";

/// Separator introducing the view state in the legacy hash syntax.
pub const LEGACY_VIEW_STATE_SEPARATOR: char = '$';

/// Query parameter carrying the search query.
pub const SEARCH_QUERY_PARAM: &str = "q";
