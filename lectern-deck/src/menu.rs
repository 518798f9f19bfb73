//! The page menu that sits next to the slides.
//!
//! Clicking the toggler flips the menu open or closed and stops there; any
//! other click anywhere on the page closes it. This is independent of slide
//! navigation and shares only the click stream.

use kuchikikiki::NodeRef;

use crate::tags::{ClassList, OPEN};

/// Open/closed state of the page menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuToggle {
  toggler: String,
  open:    bool,
}

impl Default for MenuToggle {
  fn default() -> Self {
    Self::new("menu-toggler")
  }
}

impl MenuToggle {
  /// Creates a closed menu toggled by the element with id `toggler`.
  #[must_use]
  pub fn new(toggler: impl Into<String>) -> Self {
    Self {
      toggler: toggler.into(),
      open:    false,
    }
  }

  #[must_use]
  pub const fn is_open(&self) -> bool {
    self.open
  }

  /// Handles a click on the element with id `target` and returns whether
  /// the menu is open afterwards.
  pub fn click(&mut self, target: &str) -> bool {
    self.open = target == self.toggler && !self.open;
    self.open
  }
}

/// A [`MenuToggle`] bound to the menu element of a document.
#[derive(Debug, Clone)]
pub struct DomMenu {
  state:   MenuToggle,
  element: Option<NodeRef>,
}

impl DomMenu {
  #[must_use]
  pub fn new(state: MenuToggle, element: Option<NodeRef>) -> Self {
    let menu = Self { state, element };
    menu.sync();
    menu
  }

  #[must_use]
  pub const fn state(&self) -> &MenuToggle {
    &self.state
  }

  pub fn click(&mut self, target: &str) -> bool {
    let open = self.state.click(target);
    self.sync();
    open
  }

  fn sync(&self) {
    let Some(element) =
      self.element.as_ref().and_then(|node| node.as_element())
    else {
      return;
    };
    let classes = ClassList::new(element);
    if self.state.is_open() {
      classes.add(OPEN);
    } else {
      classes.remove(OPEN);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn toggler_flips_state() {
    let mut menu = MenuToggle::default();
    assert!(menu.click("menu-toggler"));
    assert!(!menu.click("menu-toggler"));
  }

  #[test]
  fn clicks_elsewhere_close() {
    let mut menu = MenuToggle::default();
    menu.click("menu-toggler");
    assert!(!menu.click("next"));
    assert!(!menu.click("next"));
    assert!(!menu.is_open());
  }
}
