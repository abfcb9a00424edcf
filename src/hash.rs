//! Hash fragment codec for blob URLs.
//!
//! Two syntaxes coexist. Old links put the view state after `$`, current
//! links use a `tab` parameter:
//!
//! ```text
//! legacy := [coords] ["$" viewState]
//! modern := coords "&tab=" viewState | "tab=" viewState
//! coords := "L" line [":" character] ["-" endLine [":" endCharacter]]
//! ```
//!
//! Fragments come from user-editable URLs, so parsing never fails: anything
//! that matches neither syntax completely yields an empty [`HashCoords`].

use std::fmt;

use log::{debug, trace};

use crate::constants::{LEGACY_VIEW_STATE_SEPARATOR, VIEW_STATE_PARAM};
use crate::position::{Position, Range, Selection, parse_selection, write_selection};
use crate::view_state::ViewState;

/// Separator between line and character in hash coordinates.
const COORD_SEP: char = ':';

/// Coordinates and view state read from a hash fragment.
///
/// All fields are optional; the default value is the empty result returned
/// for unrecognized fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HashCoords {
    /// 1-based start line
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub line: Option<u32>,
    /// 1-based start character
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub character: Option<u32>,
    /// 1-based end line of a range
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub end_line: Option<u32>,
    /// 1-based end character of a range
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub end_character: Option<u32>,
    /// Alternate display mode
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub view_state: Option<ViewState>,
}

/// Which grammar branch matched a fragment.
enum ParsedHash {
    Legacy(HashCoords),
    Modern(HashCoords),
}

impl HashCoords {
    /// Builds coordinates from a selection and view state.
    #[must_use]
    pub fn from_parts(selection: Option<&Selection>, view_state: Option<&ViewState>) -> Self {
        let mut coords = Self {
            view_state: view_state.cloned(),
            ..Self::default()
        };
        if let Some(selection) = selection {
            let start = selection.start();
            coords.line = Some(start.line());
            coords.character = start.character();
            if let Some(range) = selection.range() {
                coords.end_line = Some(range.end().line());
                coords.end_character = range.end().character();
            }
        }
        coords
    }

    /// Returns true if neither coordinates nor a view state are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Converts the coordinates into a position or range.
    ///
    /// Returns `None` when there is no line, or when the fields do not form
    /// a valid position or same-shape range.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        let start = Position::new(self.line?, self.character).ok()?;
        match self.end_line {
            None if self.end_character.is_none() => Some(Selection::Position(start)),
            None => None,
            Some(end_line) => {
                let end = Position::new(end_line, self.end_character).ok()?;
                Range::new(start, end).ok().map(Selection::Range)
            }
        }
    }

    /// Serializes these coordinates as a pretty hash fragment, without the
    /// leading `#`.
    ///
    /// The view state always uses the modern `tab=` parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use repo_uri::parse_hash;
    ///
    /// let coords = parse_hash("L1:1$references");
    /// assert_eq!(coords.to_pretty_hash(), "L1:1&tab=references");
    /// ```
    #[must_use]
    pub fn to_pretty_hash(&self) -> String {
        let mut result = String::new();

        if let Some(selection) = self.selection() {
            result.push('L');
            write_selection(&mut result, &selection, COORD_SEP);
        }

        if let Some(view_state) = &self.view_state {
            if !result.is_empty() {
                result.push('&');
            }
            result.push_str(VIEW_STATE_PARAM);
            result.push('=');
            result.push_str(view_state.as_str());
        }

        result
    }

    fn parse_legacy(input: &str) -> Option<Self> {
        let (coords, view_state) = match input.split_once(LEGACY_VIEW_STATE_SEPARATOR) {
            Some((coords, view_state)) => (coords, Some(view_state)),
            None => (input, None),
        };

        let mut result = if coords.is_empty() {
            Self::default()
        } else {
            Self::parse_coords(coords)?
        };
        if let Some(view_state) = view_state {
            result.view_state = Some(ViewState::parse(view_state).ok()?);
        }
        Some(result)
    }

    fn parse_modern(input: &str) -> Option<Self> {
        let tab_prefix = format!("{VIEW_STATE_PARAM}=");

        if let Some(view_state) = input.strip_prefix(&tab_prefix) {
            return Some(Self {
                view_state: Some(ViewState::parse(view_state).ok()?),
                ..Self::default()
            });
        }

        let (coords, param) = input.split_once('&')?;
        let view_state = param.strip_prefix(&tab_prefix)?;
        let mut result = Self::parse_coords(coords)?;
        result.view_state = Some(ViewState::parse(view_state).ok()?);
        Some(result)
    }

    fn parse_coords(input: &str) -> Option<Self> {
        let selection = parse_selection(input.strip_prefix('L')?, COORD_SEP)?;
        Some(Self::from_parts(Some(&selection), None))
    }
}

impl ParsedHash {
    fn parse(input: &str) -> Option<Self> {
        HashCoords::parse_legacy(input)
            .map(Self::Legacy)
            .or_else(|| HashCoords::parse_modern(input).map(Self::Modern))
    }

    fn into_coords(self) -> HashCoords {
        match self {
            Self::Legacy(coords) | Self::Modern(coords) => coords,
        }
    }
}

/// Parses a blob URL hash fragment, with or without the leading `#`.
///
/// Never fails: a fragment that does not fully match the legacy or the
/// modern syntax yields [`HashCoords::default()`].
///
/// # Examples
///
/// ```
/// use repo_uri::{HashCoords, parse_hash};
///
/// let coords = parse_hash("#L1:2-3:4");
/// assert_eq!(coords.line, Some(1));
/// assert_eq!(coords.end_character, Some(4));
///
/// assert_eq!(parse_hash("L1:1&tab=references"), parse_hash("L1:1$references"));
/// assert_eq!(parse_hash("L1:2-3"), HashCoords::default());
/// ```
#[must_use]
pub fn parse_hash(hash: &str) -> HashCoords {
    let input = hash.strip_prefix('#').unwrap_or(hash);
    if input.is_empty() {
        return HashCoords::default();
    }

    match ParsedHash::parse(input) {
        Some(parsed) => {
            if let ParsedHash::Legacy(coords) = &parsed {
                if coords.view_state.is_some() {
                    trace!("read legacy view state from hash '{input}'");
                }
            }
            parsed.into_coords()
        }
        None => {
            debug!("ignoring unrecognized hash fragment '{input}'");
            HashCoords::default()
        }
    }
}

/// Serializes coordinates as a pretty hash fragment without the leading `#`.
///
/// Equivalent to [`HashCoords::to_pretty_hash`].
#[must_use]
pub fn to_pretty_hash(coords: &HashCoords) -> String {
    coords.to_pretty_hash()
}

impl fmt::Display for HashCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_pretty_hash())
    }
}
