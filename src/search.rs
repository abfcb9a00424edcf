//! Search URL query encoding.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::constants::SEARCH_QUERY_PARAM;

/// Bytes escaped in a search query: everything `encodeURIComponent` escapes
/// except `/` and `:`, which keep `repo:foo/bar` filters readable.
const SEARCH_QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'/')
    .remove(b':');

/// Builds the URL query string for a search.
///
/// Spaces become `+` and `%` becomes `%25`.
///
/// # Examples
///
/// ```
/// use repo_uri::build_search_url_query;
///
/// assert_eq!(build_search_url_query("foo bar%baz"), "q=foo+bar%25baz");
/// assert_eq!(build_search_url_query("repo:foo/bar"), "q=repo:foo/bar");
/// assert_eq!(build_search_url_query(""), "q=");
/// ```
#[must_use]
pub fn build_search_url_query(query: &str) -> String {
    let mut result = format!("{SEARCH_QUERY_PARAM}=");
    for chunk in utf8_percent_encode(query, SEARCH_QUERY) {
        // Each escaped byte is its own chunk.
        result.push_str(if chunk == "%20" { "+" } else { chunk });
    }
    result
}

/// Reads the search query back out of a URL query string.
///
/// Accepts the query with or without a leading `?`. Returns `None` when
/// there is no `q` parameter. Invalid UTF-8 is replaced rather than
/// rejected.
///
/// # Examples
///
/// ```
/// use repo_uri::parse_search_url_query;
///
/// assert_eq!(parse_search_url_query("?q=foo+bar%25baz").as_deref(), Some("foo bar%baz"));
/// assert_eq!(parse_search_url_query("x=1"), None);
/// ```
#[must_use]
pub fn parse_search_url_query(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(name, _)| *name == SEARCH_QUERY_PARAM)
        .map(|(_, value)| {
            let value = value.replace('+', " ");
            percent_decode_str(&value).decode_utf8_lossy().into_owned()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_the_url_query_for_a_search() {
        assert_eq!(build_search_url_query("foo"), "q=foo");
    }

    #[test]
    fn handles_an_empty_query() {
        assert_eq!(build_search_url_query(""), "q=");
    }

    #[test]
    fn handles_characters_that_need_encoding() {
        assert_eq!(build_search_url_query("foo bar%baz"), "q=foo+bar%25baz");
    }

    #[test]
    fn preserves_slash_and_colon_for_readability() {
        assert_eq!(build_search_url_query("repo:foo/bar"), "q=repo:foo/bar");
    }

    #[test]
    fn escapes_query_delimiters() {
        assert_eq!(build_search_url_query("a&b=c#d?e+f"), "q=a%26b%3Dc%23d%3Fe%2Bf");
    }

    #[test]
    fn keeps_unreserved_marks() {
        assert_eq!(build_search_url_query("a-b_c.d!e~f*g'h(i)"), "q=a-b_c.d!e~f*g'h(i)");
    }

    #[test]
    fn encodes_utf8_bytes() {
        assert_eq!(build_search_url_query("é"), "q=%C3%A9");
    }

    #[test]
    fn literal_percent_twenty_is_not_a_space() {
        assert_eq!(build_search_url_query("%20"), "q=%2520");
    }

    #[test]
    fn parse_finds_q_among_params() {
        assert_eq!(
            parse_search_url_query("patternType=literal&q=repo:foo/bar+x").as_deref(),
            Some("repo:foo/bar x")
        );
    }

    #[test]
    fn parse_empty_q() {
        assert_eq!(parse_search_url_query("q=").as_deref(), Some(""));
        assert_eq!(parse_search_url_query("q").as_deref(), Some(""));
    }

    #[test]
    fn parse_inverts_build() {
        for query in ["foo", "", "foo bar%baz", "repo:foo/bar", "a+b&c", "héllo wörld"] {
            let built = build_search_url_query(query);
            assert_eq!(parse_search_url_query(&built).as_deref(), Some(query));
        }
    }
}
