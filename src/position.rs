//! 1-based positions and ranges inside a file.
//!
//! Both string encodings in this crate share one coordinate grammar and
//! differ only in the separator between line and character:
//!
//! ```text
//! coord := line [sep character] ["-" line [sep character]]
//! ```
//!
//! The repo-URI uses `,` and the hash fragment uses `:`.

use std::fmt::Write as _;

use crate::error::PositionError;

/// A 1-based line and optional 1-based character offset.
///
/// # Examples
///
/// ```
/// use repo_uri::Position;
///
/// let pos = Position::new(3, Some(5)).unwrap();
/// assert_eq!(pos.line(), 3);
/// assert_eq!(pos.character(), Some(5));
///
/// assert!(Position::new(0, None).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PositionRepr", into = "PositionRepr"))]
pub struct Position {
    line: u32,
    character: Option<u32>,
}

impl Position {
    /// Creates a position.
    ///
    /// # Errors
    ///
    /// Returns `PositionError` if `line` or `character` is zero.
    pub const fn new(line: u32, character: Option<u32>) -> Result<Self, PositionError> {
        if line == 0 {
            return Err(PositionError::ZeroLine);
        }
        if let Some(0) = character {
            return Err(PositionError::ZeroCharacter);
        }
        Ok(Self { line, character })
    }

    /// Creates a line-only position.
    ///
    /// # Errors
    ///
    /// Returns `PositionError::ZeroLine` if `line` is zero.
    pub const fn at_line(line: u32) -> Result<Self, PositionError> {
        Self::new(line, None)
    }

    /// Returns the 1-based line.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the 1-based character, if present.
    #[must_use]
    pub const fn character(&self) -> Option<u32> {
        self.character
    }

    /// Returns true if both positions either carry a character or omit it.
    #[must_use]
    pub const fn same_shape(&self, other: &Self) -> bool {
        self.character.is_some() == other.character.is_some()
    }
}

/// A span between two positions of the same shape.
///
/// # Examples
///
/// ```
/// use repo_uri::{Position, Range};
///
/// let start = Position::new(1, Some(2)).unwrap();
/// let end = Position::new(3, Some(4)).unwrap();
/// let range = Range::new(start, end).unwrap();
/// assert_eq!(range.end().line(), 3);
///
/// // A line-only end cannot close a start that names a character.
/// assert!(Range::new(start, Position::at_line(3).unwrap()).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RangeRepr", into = "RangeRepr"))]
pub struct Range {
    start: Position,
    end: Position,
}

impl Range {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns `PositionError::ShapeMismatch` if exactly one of `start` and
    /// `end` carries a character.
    pub const fn new(start: Position, end: Position) -> Result<Self, PositionError> {
        if !start.same_shape(&end) {
            return Err(PositionError::ShapeMismatch);
        }
        Ok(Self { start, end })
    }

    /// Returns the start position.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Returns the end position.
    #[must_use]
    pub const fn end(&self) -> Position {
        self.end
    }
}

/// The in-file coordinates of a location: a single position or a range,
/// never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Selection {
    /// A single position
    Position(Position),
    /// A range
    Range(Range),
}

impl Selection {
    /// Returns the position, if this is a position selection.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        match self {
            Self::Position(p) => Some(*p),
            Self::Range(_) => None,
        }
    }

    /// Returns the range, if this is a range selection.
    #[must_use]
    pub const fn range(&self) -> Option<Range> {
        match self {
            Self::Position(_) => None,
            Self::Range(r) => Some(*r),
        }
    }

    /// Returns the first position covered by the selection.
    #[must_use]
    pub const fn start(&self) -> Position {
        match self {
            Self::Position(p) => *p,
            Self::Range(r) => r.start,
        }
    }
}

impl From<Position> for Selection {
    fn from(position: Position) -> Self {
        Self::Position(position)
    }
}

impl From<Range> for Selection {
    fn from(range: Range) -> Self {
        Self::Range(range)
    }
}

/// Parses `line [sep character] ["-" line [sep character]]`.
///
/// Returns `None` unless the whole input matches.
pub(crate) fn parse_selection(input: &str, sep: char) -> Option<Selection> {
    match input.split_once('-') {
        None => parse_position(input, sep).map(Selection::Position),
        Some((start, end)) => {
            let start = parse_position(start, sep)?;
            let end = parse_position(end, sep)?;
            Range::new(start, end).ok().map(Selection::Range)
        }
    }
}

fn parse_position(input: &str, sep: char) -> Option<Position> {
    let (line, character) = match input.split_once(sep) {
        Some((line, character)) => (line, Some(parse_number(character)?)),
        None => (input, None),
    };
    Position::new(parse_number(line)?, character).ok()
}

fn parse_number(input: &str) -> Option<u32> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

/// Appends the coordinate form of `selection` to `out`.
pub(crate) fn write_selection(out: &mut String, selection: &Selection, sep: char) {
    match selection {
        Selection::Position(p) => write_position(out, p, sep),
        Selection::Range(r) => {
            write_position(out, &r.start, sep);
            out.push('-');
            write_position(out, &r.end, sep);
        }
    }
}

fn write_position(out: &mut String, position: &Position, sep: char) {
    // Writing to a String cannot fail.
    let _ = write!(out, "{}", position.line);
    if let Some(character) = position.character {
        let _ = write!(out, "{sep}{character}");
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PositionRepr {
    line: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    character: Option<u32>,
}

#[cfg(feature = "serde")]
impl TryFrom<PositionRepr> for Position {
    type Error = PositionError;

    fn try_from(repr: PositionRepr) -> Result<Self, Self::Error> {
        Self::new(repr.line, repr.character)
    }
}

#[cfg(feature = "serde")]
impl From<Position> for PositionRepr {
    fn from(position: Position) -> Self {
        Self {
            line: position.line,
            character: position.character,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RangeRepr {
    start: Position,
    end: Position,
}

#[cfg(feature = "serde")]
impl TryFrom<RangeRepr> for Range {
    type Error = PositionError;

    fn try_from(repr: RangeRepr) -> Result<Self, Self::Error> {
        Self::new(repr.start, repr.end)
    }
}

#[cfg(feature = "serde")]
impl From<Range> for RangeRepr {
    fn from(range: Range) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: u32, character: Option<u32>) -> Position {
        Position::new(line, character).unwrap()
    }

    #[test]
    fn new_rejects_zero() {
        assert_eq!(Position::new(0, Some(1)), Err(PositionError::ZeroLine));
        assert_eq!(Position::new(1, Some(0)), Err(PositionError::ZeroCharacter));
    }

    #[test]
    fn range_requires_matching_shape() {
        assert_eq!(
            Range::new(pos(1, Some(2)), pos(3, None)),
            Err(PositionError::ShapeMismatch)
        );
        assert_eq!(
            Range::new(pos(1, None), pos(3, Some(4))),
            Err(PositionError::ShapeMismatch)
        );
        assert!(Range::new(pos(1, None), pos(3, None)).is_ok());
    }

    #[test]
    fn parse_line_only() {
        assert_eq!(
            parse_selection("3", ','),
            Some(Selection::Position(pos(3, None)))
        );
    }

    #[test]
    fn parse_line_and_character() {
        assert_eq!(
            parse_selection("3,5", ','),
            Some(Selection::Position(pos(3, Some(5))))
        );
        assert_eq!(
            parse_selection("3:5", ':'),
            Some(Selection::Position(pos(3, Some(5))))
        );
    }

    #[test]
    fn parse_range() {
        let expected = Range::new(pos(3, Some(5)), pos(6, Some(9))).unwrap();
        assert_eq!(parse_selection("3,5-6,9", ','), Some(Selection::Range(expected)));
    }

    #[test]
    fn parse_rejects_wrong_separator() {
        assert_eq!(parse_selection("3:5", ','), None);
    }

    #[test]
    fn parse_rejects_malformed() {
        for input in ["", "-", "a", "3,", ",5", "3-", "-3", "3,5-6", "3-6,9", "3,5--6,9", "0", "1,0", "+1", "1-2-3"] {
            assert_eq!(parse_selection(input, ','), None, "input: {input:?}");
        }
    }

    #[test]
    fn parse_rejects_overflow() {
        assert_eq!(parse_selection("99999999999", ','), None);
    }

    #[test]
    fn write_matches_parse() {
        for input in ["7", "7,2", "7-9", "7,2-9,4"] {
            let selection = parse_selection(input, ',').unwrap();
            let mut out = String::new();
            write_selection(&mut out, &selection, ',');
            assert_eq!(out, input);
        }
    }

    #[test]
    fn selection_accessors() {
        let p = Selection::from(pos(2, None));
        assert_eq!(p.position(), Some(pos(2, None)));
        assert_eq!(p.range(), None);

        let r = Range::new(pos(2, None), pos(4, None)).unwrap();
        let s = Selection::from(r);
        assert_eq!(s.range(), Some(r));
        assert_eq!(s.start(), pos(2, None));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_skips_missing_character() {
        let json = serde_json::to_value(pos(3, None)).unwrap();
        assert_eq!(json, serde_json::json!({ "line": 3 }));
        let back: Position = serde_json::from_value(json).unwrap();
        assert_eq!(back, pos(3, None));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_revalidates_positions_and_ranges() {
        assert!(serde_json::from_value::<Position>(serde_json::json!({ "line": 0 })).is_err());
        let mismatched = serde_json::json!({
            "start": { "line": 1, "character": 2 },
            "end": { "line": 3 }
        });
        assert!(serde_json::from_value::<Range>(mismatched).is_err());
    }
}
