//! Error types for deck operations.

use std::{io, string::FromUtf8Error};

/// Result type for deck operations.
pub type DeckResult<T> = Result<T, DeckError>;

/// Errors that can occur while building or serializing a deck.
///
/// Navigation itself never fails; these only cover malformed configuration
/// and I/O at the edges.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
  #[error("Invalid CSS selector: '{0}'")]
  InvalidSelector(String),
  #[error("Invalid input event: '{0}'")]
  InvalidEvent(String),
  #[error("Invalid URL: {0}")]
  Url(#[from] url::ParseError),
  #[error("I/O error: {0}")]
  Io(#[from] io::Error),
  #[error("Serialized document is not valid UTF-8: {0}")]
  Utf8(#[from] FromUtf8Error),
}
