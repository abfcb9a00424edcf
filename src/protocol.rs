//! Records handed to a language-service collaborator.
//!
//! Language services count lines and characters from 0, while every
//! encoding in this crate counts from 1. [`ProtocolPosition::from_one_based`]
//! is the only place that crosses between the two.

use crate::location::RepoLocation;
use crate::position::{Position, Range};

/// A 0-based position as sent over a language-service protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtocolPosition {
    /// 0-based line
    pub line: u32,
    /// 0-based character
    pub character: u32,
}

impl ProtocolPosition {
    /// Converts a 1-based position. A line-only position maps to the first
    /// character of the line.
    ///
    /// # Examples
    ///
    /// ```
    /// use repo_uri::{Position, ProtocolPosition};
    ///
    /// let pos = ProtocolPosition::from_one_based(Position::new(3, Some(5)).unwrap());
    /// assert_eq!((pos.line, pos.character), (2, 4));
    /// ```
    #[must_use]
    pub const fn from_one_based(position: Position) -> Self {
        let character = match position.character() {
            Some(character) => character.saturating_sub(1),
            None => 0,
        };
        Self {
            line: position.line().saturating_sub(1),
            character,
        }
    }
}

impl From<Position> for ProtocolPosition {
    fn from(position: Position) -> Self {
        Self::from_one_based(position)
    }
}

/// A 0-based range as sent over a language-service protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtocolRange {
    /// Start position
    pub start: ProtocolPosition,
    /// End position
    pub end: ProtocolPosition,
}

impl ProtocolRange {
    /// Converts a 1-based range.
    #[must_use]
    pub const fn from_one_based(range: Range) -> Self {
        Self {
            start: ProtocolPosition::from_one_based(range.start()),
            end: ProtocolPosition::from_one_based(range.end()),
        }
    }
}

impl From<Range> for ProtocolRange {
    fn from(range: Range) -> Self {
        Self::from_one_based(range)
    }
}

/// Identifies a document to a language service by its repo-URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextDocumentIdentifier {
    /// The document's repo-URI
    pub uri: String,
}

/// A document and a position inside it, for hover and definition requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TextDocumentPositionParams {
    /// The document
    pub text_document: TextDocumentIdentifier,
    /// 0-based position in the document
    pub position: ProtocolPosition,
}

impl RepoLocation {
    /// Returns the repo-URI used to identify this file to a language
    /// service.
    ///
    /// Unlike [`RepoLocation::to_repo_uri`], the resolved commit ID takes
    /// precedence over the revision, and coordinates are never included.
    /// Returns `None` when there is no file path.
    ///
    /// # Examples
    ///
    /// ```
    /// use repo_uri::{CommitId, RepoLocation};
    ///
    /// let commit = CommitId::parse("24fca303ac6da784b9e8269f724ddeb0b2eea5e7")?;
    /// let loc = RepoLocation::parse("git://github.com/gorilla/mux?branch#mux.go:3")?
    ///     .with_commit_id(commit)?;
    /// assert_eq!(
    ///     loc.text_document_uri().as_deref(),
    ///     Some("git://github.com/gorilla/mux?24fca303ac6da784b9e8269f724ddeb0b2eea5e7#mux.go"),
    /// );
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn text_document_uri(&self) -> Option<String> {
        let file_path = self.file_path.as_deref()?;
        let document = Self {
            rev: self
                .commit_id
                .as_ref()
                .map(|commit_id| commit_id.as_str().to_string())
                .or_else(|| self.display_rev().map(str::to_string)),
            selection: None,
            view_state: None,
            file_path: Some(file_path.to_string()),
            ..self.clone()
        };
        Some(document.to_repo_uri())
    }

    /// Returns the identifier of this file for a language service.
    #[must_use]
    pub fn text_document(&self) -> Option<TextDocumentIdentifier> {
        self.text_document_uri().map(|uri| TextDocumentIdentifier { uri })
    }

    /// Returns the request parameters for a hover or definition lookup at
    /// this location's position.
    ///
    /// Returns `None` without a file path or a single position.
    #[must_use]
    pub fn text_document_position_params(&self) -> Option<TextDocumentPositionParams> {
        let position = self.position()?;
        Some(TextDocumentPositionParams {
            text_document: self.text_document()?,
            position: ProtocolPosition::from_one_based(position),
        })
    }
}
