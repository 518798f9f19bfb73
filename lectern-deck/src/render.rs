//! Applying transitions to slide containers.
//!
//! [`Renderer`] is the seam between the navigation state machine and whatever
//! displays slides. [`ClassRenderer`] implements the class protocol from
//! [`crate::tags`] on top of any [`SlideSurface`], be it the parsed document
//! ([`DomSurface`]) or an in-memory model ([`MemorySurface`]).

use std::collections::BTreeSet;

use kuchikikiki::NodeRef;
use log::trace;

use crate::tags::{CURRENT, ClassList, Direction, PREVIOUS};

/// A single move from one slide to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
  /// Slide on screen before the move, `None` for the initial render.
  pub from:      Option<usize>,
  /// Slide on screen after the move.
  pub to:        usize,
  /// Direction hint, `None` when no animation should play.
  pub direction: Option<Direction>,
}

/// Applies visual state for transitions.
pub trait Renderer {
  fn render(&mut self, transition: &Transition);

  /// Updates a textual position indicator, if the renderer has one.
  fn show_position(&mut self, _index: usize, _count: usize) {}
}

/// Per-slide class storage a [`ClassRenderer`] can drive.
pub trait SlideSurface {
  fn slide_count(&self) -> usize;
  fn has_class(&self, index: usize, class: &str) -> bool;
  fn add_class(&mut self, index: usize, class: &str);
  fn remove_class(&mut self, index: usize, class: &str);

  /// Sets the text of the slide number indicator. Surfaces without one
  /// ignore it.
  fn set_indicator(&mut self, _text: &str) {}
}

/// Renders transitions by moving the `current`/`previous`/direction tags.
#[derive(Debug, Clone)]
pub struct ClassRenderer<S> {
  surface: S,
}

impl<S: SlideSurface> ClassRenderer<S> {
  pub const fn new(surface: S) -> Self {
    Self { surface }
  }

  pub const fn surface(&self) -> &S {
    &self.surface
  }

  pub fn into_surface(self) -> S {
    self.surface
  }

  fn tagged(&self, class: &str) -> Vec<usize> {
    (0..self.surface.slide_count())
      .filter(|&index| self.surface.has_class(index, class))
      .collect()
  }

  fn strip_directions(&mut self, index: usize) {
    for direction in Direction::ALL {
      self.surface.remove_class(index, direction.as_class());
    }
  }
}

impl<S: SlideSurface> Renderer for ClassRenderer<S> {
  fn render(&mut self, transition: &Transition) {
    if transition.to >= self.surface.slide_count() {
      return;
    }
    trace!("Rendering {transition:?}");

    // Slides that were leaving last time are fully reset.
    for previous in self.tagged(PREVIOUS) {
      self.surface.remove_class(previous, PREVIOUS);
      self.strip_directions(previous);
    }

    // Exactly one slide on screen becomes the leaving one: the transition's
    // origin if it is tagged, else the first tagged slide. Any other stray
    // `current` tag is dropped.
    let current = self.tagged(CURRENT);
    let outgoing = transition
      .from
      .filter(|from| current.contains(from))
      .or_else(|| current.first().copied());
    for index in current {
      self.surface.remove_class(index, CURRENT);
      self.strip_directions(index);
    }
    if let Some(outgoing) = outgoing {
      self.surface.add_class(outgoing, PREVIOUS);
      if let Some(direction) = transition.direction {
        self.surface.add_class(outgoing, direction.as_class());
      }
    }

    let target = transition.to;
    self.surface.add_class(target, CURRENT);
    self.surface.remove_class(target, PREVIOUS);
    self.strip_directions(target);
    if let Some(direction) = transition.direction {
      self.surface.add_class(target, direction.as_class());
    }
  }

  fn show_position(&mut self, index: usize, count: usize) {
    self
      .surface
      .set_indicator(&format!("{} / {count}", index + 1));
  }
}

/// Slide classes kept in memory, for headless use and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySurface {
  slides:    Vec<BTreeSet<String>>,
  indicator: Option<String>,
}

impl MemorySurface {
  #[must_use]
  pub fn new(slide_count: usize) -> Self {
    Self {
      slides:    vec![BTreeSet::new(); slide_count],
      indicator: None,
    }
  }

  /// Classes of the slide at `index`, empty when out of range.
  #[must_use]
  pub fn classes(&self, index: usize) -> Vec<&str> {
    self
      .slides
      .get(index)
      .map(|classes| classes.iter().map(String::as_str).collect())
      .unwrap_or_default()
  }

  /// Indices of every slide carrying `class`.
  #[must_use]
  pub fn tagged(&self, class: &str) -> Vec<usize> {
    self
      .slides
      .iter()
      .enumerate()
      .filter(|(_, classes)| classes.contains(class))
      .map(|(index, _)| index)
      .collect()
  }

  #[must_use]
  pub fn indicator(&self) -> Option<&str> {
    self.indicator.as_deref()
  }
}

impl SlideSurface for MemorySurface {
  fn slide_count(&self) -> usize {
    self.slides.len()
  }

  fn has_class(&self, index: usize, class: &str) -> bool {
    self
      .slides
      .get(index)
      .is_some_and(|classes| classes.contains(class))
  }

  fn add_class(&mut self, index: usize, class: &str) {
    if let Some(classes) = self.slides.get_mut(index) {
      classes.insert(class.to_owned());
    }
  }

  fn remove_class(&mut self, index: usize, class: &str) {
    if let Some(classes) = self.slides.get_mut(index) {
      classes.remove(class);
    }
  }

  fn set_indicator(&mut self, text: &str) {
    self.indicator = Some(text.to_owned());
  }
}

/// Slide classes stored on the segmented document's containers.
///
/// Holds shared handles into the tree, so changes are visible when the
/// document is serialized.
#[derive(Debug, Clone)]
pub struct DomSurface {
  slides:    Vec<NodeRef>,
  indicator: Option<NodeRef>,
}

impl DomSurface {
  #[must_use]
  pub const fn new(slides: Vec<NodeRef>, indicator: Option<NodeRef>) -> Self {
    Self { slides, indicator }
  }

  #[must_use]
  pub fn slides(&self) -> &[NodeRef] {
    &self.slides
  }

  fn with_classes<T>(
    &self,
    index: usize,
    f: impl FnOnce(ClassList<'_>) -> T,
  ) -> Option<T> {
    self
      .slides
      .get(index)
      .and_then(|node| node.as_element())
      .map(|element| f(ClassList::new(element)))
  }
}

impl SlideSurface for DomSurface {
  fn slide_count(&self) -> usize {
    self.slides.len()
  }

  fn has_class(&self, index: usize, class: &str) -> bool {
    self
      .with_classes(index, |list| list.contains(class))
      .unwrap_or(false)
  }

  fn add_class(&mut self, index: usize, class: &str) {
    self.with_classes(index, |list| list.add(class));
  }

  fn remove_class(&mut self, index: usize, class: &str) {
    self.with_classes(index, |list| list.remove(class));
  }

  fn set_indicator(&mut self, text: &str) {
    if let Some(indicator) = &self.indicator {
      for child in indicator.children().collect::<Vec<_>>() {
        child.detach();
      }
      indicator.append(NodeRef::new_text(text));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn step(
    renderer: &mut ClassRenderer<MemorySurface>,
    from: Option<usize>,
    to: usize,
    direction: Option<Direction>,
  ) {
    renderer.render(&Transition {
      from,
      to,
      direction,
    });
  }

  #[test]
  fn initial_render_has_no_direction() {
    let mut renderer = ClassRenderer::new(MemorySurface::new(3));
    step(&mut renderer, None, 0, None);
    assert_eq!(renderer.surface().classes(0), ["current"]);
    assert!(renderer.surface().tagged(PREVIOUS).is_empty());
  }

  #[test]
  fn outgoing_slide_becomes_previous_with_direction() {
    let mut renderer = ClassRenderer::new(MemorySurface::new(3));
    step(&mut renderer, None, 0, None);
    step(&mut renderer, Some(0), 1, Some(Direction::Right));

    let surface = renderer.surface();
    assert_eq!(surface.classes(0), ["previous", "right"]);
    assert_eq!(surface.classes(1), ["current", "right"]);
  }

  #[test]
  fn stale_previous_is_fully_reset() {
    let mut renderer = ClassRenderer::new(MemorySurface::new(3));
    step(&mut renderer, None, 0, None);
    step(&mut renderer, Some(0), 1, Some(Direction::Right));
    step(&mut renderer, Some(1), 2, Some(Direction::Right));

    let surface = renderer.surface();
    assert!(surface.classes(0).is_empty());
    assert_eq!(surface.classes(1), ["previous", "right"]);
    assert_eq!(surface.classes(2), ["current", "right"]);
  }

  #[test]
  fn returning_to_previous_slide_clears_its_exit_tags() {
    let mut renderer = ClassRenderer::new(MemorySurface::new(3));
    step(&mut renderer, None, 0, None);
    step(&mut renderer, Some(0), 1, Some(Direction::Right));
    step(&mut renderer, Some(1), 0, Some(Direction::Left));

    let surface = renderer.surface();
    assert_eq!(surface.classes(0), ["current", "left"]);
    assert_eq!(surface.classes(1), ["left", "previous"]);
  }

  #[test]
  fn single_slide_stays_current() {
    let mut renderer = ClassRenderer::new(MemorySurface::new(1));
    step(&mut renderer, None, 0, None);
    step(&mut renderer, Some(0), 0, Some(Direction::Right));

    let surface = renderer.surface();
    assert_eq!(surface.tagged(CURRENT), [0]);
    assert!(surface.tagged(PREVIOUS).is_empty());
  }

  #[test]
  fn stray_tags_are_collapsed_to_one_of_each() {
    let mut surface = MemorySurface::new(4);
    for index in [0, 1] {
      surface.add_class(index, CURRENT);
    }
    for index in [2, 3] {
      surface.add_class(index, PREVIOUS);
      surface.add_class(index, "left");
    }
    let mut renderer = ClassRenderer::new(surface);
    step(&mut renderer, Some(1), 3, Some(Direction::Right));

    let surface = renderer.surface();
    assert_eq!(surface.tagged(CURRENT), [3]);
    assert_eq!(surface.tagged(PREVIOUS), [1]);
    assert!(surface.classes(0).is_empty());
    assert!(surface.classes(2).is_empty());
    assert_eq!(surface.classes(3), ["current", "right"]);
  }

  #[test]
  fn out_of_range_target_is_ignored() {
    let mut renderer = ClassRenderer::new(MemorySurface::new(2));
    step(&mut renderer, None, 5, None);
    assert!(renderer.surface().tagged(CURRENT).is_empty());
  }

  #[test]
  fn position_indicator_is_one_based() {
    let mut renderer = ClassRenderer::new(MemorySurface::new(4));
    renderer.show_position(2, 4);
    assert_eq!(renderer.surface().indicator(), Some("3 / 4"));
  }
}
