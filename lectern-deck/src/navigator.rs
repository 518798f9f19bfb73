//! The slide navigation state machine.
//!
//! A [`Navigator`] owns the current index over a fixed number of slides.
//! `next` and `previous` wrap around at both ends, so every transition is
//! total. After each transition the renderer is told what changed and the
//! index is written back into the page location.

use log::{debug, warn};

use crate::{
  input::Command,
  location::{Location, SlideParam},
  render::{Renderer, Transition},
  tags::Direction,
};

/// Current-slide state over `slide_count` slides.
///
/// With zero slides every operation is a no-op.
#[derive(Debug)]
pub struct Navigator<R, L> {
  slide_count: usize,
  current:     usize,
  rendered:    bool,
  renderer:    R,
  location:    L,
  param:       SlideParam,
}

impl<R: Renderer, L: Location> Navigator<R, L> {
  pub const fn new(
    slide_count: usize,
    renderer: R,
    location: L,
    param: SlideParam,
  ) -> Self {
    Self {
      slide_count,
      current: 0,
      rendered: false,
      renderer,
      location,
      param,
    }
  }

  /// Reads the starting slide from the location and renders it without a
  /// direction hint.
  ///
  /// A missing or unparsable parameter starts at the first slide; values
  /// past the end start at the last one.
  pub fn initialize(&mut self) {
    if self.is_empty() {
      warn!("No slides found, navigation is disabled");
      return;
    }

    let raw = self.location.query_param(&self.param.name);
    self.current = match raw.as_deref() {
      Some(raw) => {
        self.param.decode(raw, self.slide_count).unwrap_or_else(|| {
          warn!(
            "Ignoring invalid '{}' parameter '{raw}', starting at the first \
             slide",
            self.param.name
          );
          0
        })
      },
      None => 0,
    };
    self.show(None, None);
  }

  pub fn next(&mut self) {
    if self.is_empty() {
      return;
    }
    let from = self.current;
    self.current = (self.current + 1) % self.slide_count;
    self.show(Some(from), Some(Direction::Right));
  }

  pub fn previous(&mut self) {
    if self.is_empty() {
      return;
    }
    let from = self.current;
    self.current = (self.current + self.slide_count - 1) % self.slide_count;
    self.show(Some(from), Some(Direction::Left));
  }

  /// Jumps straight to `index`, clamped to the last slide.
  ///
  /// The direction hint follows the index order; jumping to the slide
  /// already shown does nothing.
  pub fn go_to(&mut self, index: usize) {
    if self.is_empty() {
      return;
    }
    let target = index.min(self.slide_count - 1);
    if self.rendered && target == self.current {
      return;
    }
    let from = self.current;
    let direction = if target < from {
      Direction::Left
    } else {
      Direction::Right
    };
    self.current = target;
    self.show(self.rendered.then_some(from), Some(direction));
  }

  pub fn dispatch(&mut self, command: Command) {
    match command {
      Command::Next => self.next(),
      Command::Previous => self.previous(),
    }
  }

  #[must_use]
  pub const fn current_index(&self) -> usize {
    self.current
  }

  #[must_use]
  pub const fn slide_count(&self) -> usize {
    self.slide_count
  }

  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.slide_count == 0
  }

  #[must_use]
  pub const fn renderer(&self) -> &R {
    &self.renderer
  }

  #[must_use]
  pub const fn location(&self) -> &L {
    &self.location
  }

  pub fn into_parts(self) -> (R, L) {
    (self.renderer, self.location)
  }

  fn show(&mut self, from: Option<usize>, direction: Option<Direction>) {
    debug!(
      "Showing slide {} of {} ({})",
      self.current + 1,
      self.slide_count,
      direction.map_or("none", Direction::as_class)
    );
    self.renderer.render(&Transition {
      from,
      to: self.current,
      direction,
    });
    self
      .location
      .replace_query_param(&self.param.name, &self.param.encode(self.current));
    self.renderer.show_position(self.current, self.slide_count);
    self.rendered = true;
  }
}
