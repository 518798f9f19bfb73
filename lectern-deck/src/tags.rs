//! The class protocol shared with the stylesheet.
//!
//! Slide containers carry a small set of class tags: [`CURRENT`] on exactly
//! one container after a render, [`PREVIOUS`] on at most one, and a transient
//! [`Direction`] tag on whichever containers took part in the last
//! transition. The stylesheet owns every visual effect; this module only
//! manipulates the `class` attribute.

use std::fmt;

use kuchikikiki::ElementData;

/// Tag carried by the slide on screen.
pub const CURRENT: &str = "current";

/// Tag carried by the slide that was on screen before the last transition.
pub const PREVIOUS: &str = "previous";

/// Tag carried by the companion menu while it is expanded.
pub const OPEN: &str = "open";

/// Direction hint for transition styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
  /// Backward, towards lower slide indices.
  Left,
  /// Forward, towards higher slide indices.
  Right,
}

impl Direction {
  /// Every direction tag, used when stripping stale hints.
  pub const ALL: [Self; 2] = [Self::Left, Self::Right];

  /// The class name applied to slide containers.
  #[must_use]
  pub const fn as_class(self) -> &'static str {
    match self {
      Self::Left => "left",
      Self::Right => "right",
    }
  }
}

impl fmt::Display for Direction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_class())
  }
}

/// A view over the whitespace separated `class` attribute of an element.
///
/// Mirrors the subset of `DOMTokenList` the deck needs. Adding is idempotent,
/// and removing the last class drops the attribute entirely.
#[derive(Clone, Copy)]
pub struct ClassList<'a> {
  element: &'a ElementData,
}

impl<'a> ClassList<'a> {
  #[must_use]
  pub const fn new(element: &'a ElementData) -> Self {
    Self { element }
  }

  /// Returns the classes in attribute order.
  #[must_use]
  pub fn classes(&self) -> Vec<String> {
    self
      .element
      .attributes
      .borrow()
      .get("class")
      .map(|value| value.split_ascii_whitespace().map(str::to_owned).collect())
      .unwrap_or_default()
  }

  #[must_use]
  pub fn contains(&self, class: &str) -> bool {
    self
      .element
      .attributes
      .borrow()
      .get("class")
      .is_some_and(|value| value.split_ascii_whitespace().any(|c| c == class))
  }

  pub fn add(&self, class: &str) {
    let mut classes = self.classes();
    if classes.iter().any(|c| c == class) {
      return;
    }
    classes.push(class.to_owned());
    self.store(&classes);
  }

  pub fn remove(&self, class: &str) {
    let mut classes = self.classes();
    let before = classes.len();
    classes.retain(|c| c != class);
    if classes.len() != before {
      self.store(&classes);
    }
  }

  /// Flips `class` and returns whether it is now present.
  pub fn toggle(&self, class: &str) -> bool {
    if self.contains(class) {
      self.remove(class);
      false
    } else {
      self.add(class);
      true
    }
  }

  /// Replaces `old` with `new` in place. Returns `false` and leaves the list
  /// untouched when `old` is absent.
  pub fn replace(&self, old: &str, new: &str) -> bool {
    let mut classes = self.classes();
    let Some(position) = classes.iter().position(|c| c == old) else {
      return false;
    };

    if classes.iter().any(|c| c == new) {
      classes.remove(position);
    } else {
      new.clone_into(&mut classes[position]);
    }
    self.store(&classes);
    true
  }

  fn store(&self, classes: &[String]) {
    let mut attributes = self.element.attributes.borrow_mut();
    if classes.is_empty() {
      attributes.remove("class");
    } else {
      attributes.insert("class", classes.join(" "));
    }
  }
}
