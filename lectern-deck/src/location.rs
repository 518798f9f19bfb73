//! Mirroring the current slide into the page address.
//!
//! The index lives in a single query parameter. It is read once when a
//! navigator initializes and replaced in place after every transition, never
//! adding a history entry.

use url::{Url, form_urlencoded};

use crate::error::DeckResult;

/// Numbering convention of the slide query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexBase {
  /// `?slide=0` is the first slide.
  Zero,
  /// `?slide=1` is the first slide.
  #[default]
  One,
}

impl IndexBase {
  const fn offset(self) -> usize {
    match self {
      Self::Zero => 0,
      Self::One => 1,
    }
  }
}

/// Name and numbering of the query parameter carrying the slide index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideParam {
  pub name: String,
  pub base: IndexBase,
}

impl Default for SlideParam {
  fn default() -> Self {
    Self {
      name: "slide".to_owned(),
      base: IndexBase::One,
    }
  }
}

impl SlideParam {
  /// Renders a zero-based index as a parameter value.
  #[must_use]
  pub fn encode(&self, index: usize) -> String {
    (index + self.base.offset()).to_string()
  }

  /// Parses a parameter value into a zero-based index.
  ///
  /// Values past the last slide are clamped onto it. Anything that is not a
  /// base-10 number in range of the convention yields `None`, as does any
  /// value when there are no slides.
  #[must_use]
  pub fn decode(&self, raw: &str, slide_count: usize) -> Option<usize> {
    if slide_count == 0 {
      return None;
    }
    let value: usize = raw.trim().parse().ok()?;
    let index = value.checked_sub(self.base.offset())?;
    Some(index.min(slide_count - 1))
  }
}

/// The page address as seen by a navigator.
pub trait Location {
  fn query_param(&self, name: &str) -> Option<String>;

  /// Sets `name` to `value`, replacing the current history entry.
  fn replace_query_param(&mut self, name: &str, value: &str);
}

/// A [`Location`] backed by a parsed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlLocation {
  url:          Url,
  replacements: usize,
}

impl UrlLocation {
  #[must_use]
  pub const fn new(url: Url) -> Self {
    Self {
      url,
      replacements: 0,
    }
  }

  /// Parses an absolute URL.
  ///
  /// # Errors
  ///
  /// Returns [`crate::DeckError::Url`] if `input` is not a valid URL.
  pub fn parse(input: &str) -> DeckResult<Self> {
    Ok(Self::new(Url::parse(input)?))
  }

  #[must_use]
  pub const fn url(&self) -> &Url {
    &self.url
  }

  #[must_use]
  pub fn href(&self) -> &str {
    self.url.as_str()
  }

  /// How many times the current history entry was replaced.
  #[must_use]
  pub const fn replacements(&self) -> usize {
    self.replacements
  }
}

impl Location for UrlLocation {
  fn query_param(&self, name: &str) -> Option<String> {
    self
      .url
      .query_pairs()
      .find(|(key, _)| key == name)
      .map(|(_, value)| value.into_owned())
  }

  /// Splices `name=value` into the raw query. Unrelated pairs keep their
  /// exact text and position, the first `name` pair is replaced in place,
  /// later duplicates are dropped, and a missing pair is appended.
  fn replace_query_param(&mut self, name: &str, value: &str) {
    let pair = form_urlencoded::Serializer::new(String::new())
      .append_pair(name, value)
      .finish();

    let mut replaced = false;
    let mut segments = Vec::new();
    for segment in self.url.query().unwrap_or_default().split('&') {
      let key = form_urlencoded::parse(segment.as_bytes())
        .next()
        .map(|(key, _)| key);
      if key.as_deref() != Some(name) {
        if !segment.is_empty() {
          segments.push(segment.to_owned());
        }
        continue;
      }
      if !replaced {
        segments.push(pair.clone());
        replaced = true;
      }
    }
    if !replaced {
      segments.push(pair);
    }

    self.url.set_query(Some(&segments.join("&")));
    self.replacements += 1;
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;

  fn location(input: &str) -> UrlLocation {
    UrlLocation::parse(input).expect("valid test URL")
  }

  #[test]
  fn one_based_decoding() {
    let param = SlideParam::default();
    assert_eq!(param.decode("3", 5), Some(2));
    assert_eq!(param.decode(" 1 ", 5), Some(0));
    assert_eq!(param.decode("0", 5), None);
    assert_eq!(param.decode("-1", 5), None);
    assert_eq!(param.decode("two", 5), None);
    assert_eq!(param.decode("", 5), None);
  }

  #[test]
  fn zero_based_decoding() {
    let param = SlideParam {
      base: IndexBase::Zero,
      ..Default::default()
    };
    assert_eq!(param.decode("0", 5), Some(0));
    assert_eq!(param.decode("3", 5), Some(3));
    assert_eq!(param.encode(3), "3");
  }

  #[test]
  fn out_of_range_values_are_clamped() {
    let param = SlideParam::default();
    assert_eq!(param.decode("99", 5), Some(4));
    assert_eq!(param.decode("1", 0), None);
  }

  #[test]
  fn encoding_is_one_based_by_default() {
    assert_eq!(SlideParam::default().encode(0), "1");
  }

  #[test]
  fn replace_keeps_other_pairs_in_order() {
    let mut loc = location("https://example.org/deck.html?theme=dark&slide=2&x=y");
    loc.replace_query_param("slide", "5");
    assert_eq!(loc.href(), "https://example.org/deck.html?theme=dark&slide=5&x=y");
    assert_eq!(loc.replacements(), 1);
  }

  #[test]
  fn replace_appends_missing_param() {
    let mut loc = location("https://example.org/deck.html#notes");
    assert_eq!(loc.query_param("slide"), None);
    loc.replace_query_param("slide", "1");
    assert_eq!(loc.query_param("slide").as_deref(), Some("1"));
    assert_eq!(loc.url().fragment(), Some("notes"));
  }

  #[test]
  fn unrelated_pairs_keep_their_exact_text() {
    let mut loc =
      location("https://example.org/deck.html?q=a%20b&flag&slide=2&t=x+y");
    loc.replace_query_param("slide", "3");
    assert_eq!(
      loc.href(),
      "https://example.org/deck.html?q=a%20b&flag&slide=3&t=x+y"
    );
  }

  #[test]
  fn duplicate_params_collapse_to_one() {
    let mut loc = location("https://example.org/?slide=1&slide=4");
    assert_eq!(loc.query_param("slide").as_deref(), Some("1"));
    loc.replace_query_param("slide", "2");
    assert_eq!(loc.href(), "https://example.org/?slide=2");
  }
}
