//! Input events and their mapping onto navigation commands.
//!
//! Keyboard, pointer and touch input all reduce to [`Command`]s. Events are
//! handled one at a time, in arrival order.

use std::str::FromStr;

use log::trace;

use crate::error::DeckError;

/// Default horizontal travel, in CSS pixels, before a drag counts as a swipe.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// A navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
  Next,
  Previous,
}

/// Key identity as reported by `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
  ArrowLeft,
  ArrowRight,
  Other(String),
}

impl From<&str> for Key {
  fn from(name: &str) -> Self {
    match name {
      "ArrowLeft" => Self::ArrowLeft,
      "ArrowRight" => Self::ArrowRight,
      other => Self::Other(other.to_owned()),
    }
  }
}

/// A single input event delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
  KeyDown(Key),
  /// A click whose target carries the element id `target`.
  Click { target: String },
  TouchStart { x: f64 },
  TouchMove { x: f64 },
}

impl FromStr for InputEvent {
  type Err = DeckError;

  /// Parses the textual event form used by the CLI: `ArrowLeft`,
  /// `ArrowRight`, `key:<name>`, `click:<id>`, `touchstart:<x>` and
  /// `touchmove:<x>`.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || DeckError::InvalidEvent(s.to_owned());
    let s = s.trim();

    let Some((kind, value)) = s.split_once(':') else {
      return match s {
        "ArrowLeft" | "ArrowRight" => Ok(Self::KeyDown(Key::from(s))),
        _ => Err(invalid()),
      };
    };

    let coordinate = || value.trim().parse::<f64>().map_err(|_| invalid());
    match kind.trim().to_ascii_lowercase().as_str() {
      "key" if !value.is_empty() => Ok(Self::KeyDown(Key::from(value))),
      "click" if !value.is_empty() => {
        Ok(Self::Click {
          target: value.to_owned(),
        })
      },
      "touchstart" => Ok(Self::TouchStart { x: coordinate()? }),
      "touchmove" => Ok(Self::TouchMove { x: coordinate()? }),
      _ => Err(invalid()),
    }
  }
}

/// Element ids of the on-page previous/next controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
  pub previous: String,
  pub next:     String,
}

impl Default for Controls {
  fn default() -> Self {
    Self {
      previous: "previous".to_owned(),
      next:     "next".to_owned(),
    }
  }
}

/// Horizontal swipe detection.
///
/// A gesture is armed by [`SwipeGesture::start`] and fires at most once: as
/// soon as the horizontal travel exceeds the threshold the gesture is
/// consumed, and further movement is ignored until the next touch starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeGesture {
  threshold: f64,
  origin:    Option<f64>,
}

impl Default for SwipeGesture {
  fn default() -> Self {
    Self::new(SWIPE_THRESHOLD)
  }
}

impl SwipeGesture {
  #[must_use]
  pub const fn new(threshold: f64) -> Self {
    Self {
      threshold,
      origin: None,
    }
  }

  pub const fn start(&mut self, x: f64) {
    self.origin = Some(x);
  }

  /// Feeds a touch position and returns the command it triggers, if any.
  pub fn track(&mut self, x: f64) -> Option<Command> {
    let delta = x - self.origin?;
    let command = if delta < -self.threshold {
      Command::Previous
    } else if delta > self.threshold {
      Command::Next
    } else {
      return None;
    };
    self.origin = None;
    Some(command)
  }

  #[must_use]
  pub const fn is_armed(&self) -> bool {
    self.origin.is_some()
  }
}

/// Maps raw input events onto navigation commands.
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
  controls: Controls,
  swipe:    SwipeGesture,
}

impl InputRouter {
  #[must_use]
  pub const fn new(controls: Controls, swipe: SwipeGesture) -> Self {
    Self { controls, swipe }
  }

  pub fn route(&mut self, event: &InputEvent) -> Option<Command> {
    let command = match event {
      InputEvent::KeyDown(Key::ArrowLeft) => Some(Command::Previous),
      InputEvent::KeyDown(Key::ArrowRight) => Some(Command::Next),
      InputEvent::KeyDown(Key::Other(_)) => None,
      InputEvent::Click { target } if *target == self.controls.previous => {
        Some(Command::Previous)
      },
      InputEvent::Click { target } if *target == self.controls.next => {
        Some(Command::Next)
      },
      InputEvent::Click { .. } => None,
      InputEvent::TouchStart { x } => {
        self.swipe.start(*x);
        None
      },
      InputEvent::TouchMove { x } => self.swipe.track(*x),
    };
    trace!("Routed {event:?} to {command:?}");
    command
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;

  fn parse(s: &str) -> InputEvent {
    s.parse().expect("valid event")
  }

  #[test]
  fn swipe_fires_once_per_gesture() {
    let mut gesture = SwipeGesture::default();
    gesture.start(100.0);
    assert_eq!(gesture.track(60.0), None);
    assert_eq!(gesture.track(40.0), Some(Command::Previous));
    assert!(!gesture.is_armed());
    assert_eq!(gesture.track(10.0), None);
  }

  #[test]
  fn rightward_swipe_is_next() {
    let mut gesture = SwipeGesture::default();
    gesture.start(10.0);
    assert_eq!(gesture.track(61.0), Some(Command::Next));
  }

  #[test]
  fn threshold_must_be_exceeded() {
    let mut gesture = SwipeGesture::default();
    gesture.start(100.0);
    assert_eq!(gesture.track(50.0), None);
    assert_eq!(gesture.track(150.0), None);
    assert!(gesture.is_armed());
  }

  #[test]
  fn move_without_start_is_ignored() {
    let mut router = InputRouter::default();
    assert_eq!(router.route(&InputEvent::TouchMove { x: 500.0 }), None);
  }

  #[test]
  fn controls_and_keys() {
    let mut router = InputRouter::default();
    assert_eq!(router.route(&parse("ArrowLeft")), Some(Command::Previous));
    assert_eq!(router.route(&parse("key:ArrowRight")), Some(Command::Next));
    assert_eq!(router.route(&parse("key:Enter")), None);
    assert_eq!(router.route(&parse("click:next")), Some(Command::Next));
    assert_eq!(router.route(&parse("click:previous")), Some(Command::Previous));
    assert_eq!(router.route(&parse("click:menu-toggler")), None);
  }

  #[test]
  fn event_parsing() {
    assert_eq!(parse("touchstart:12.5"), InputEvent::TouchStart { x: 12.5 });
    assert_eq!(parse("TouchMove: -3"), InputEvent::TouchMove { x: -3.0 });
    assert!("touchmove:left".parse::<InputEvent>().is_err());
    assert!("click:".parse::<InputEvent>().is_err());
    assert!("Enter".parse::<InputEvent>().is_err());
  }
}
