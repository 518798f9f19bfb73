//! # lectern-deck - Rule-delimited HTML slides
//!
//! Turns a flat HTML document, with sections separated by `<hr>` markers,
//! into a sequence of slide containers and drives the current slide through
//! keyboard, click and swipe input. The current position is mirrored into a
//! single URL query parameter.
//!
//! ## Quick Start
//!
//! ```rust
//! use lectern_deck::{Deck, DeckOptions, InputEvent, UrlLocation};
//!
//! let html = "<h1>Talk</h1><hr><p>One</p><hr><p>Two</p>";
//! let deck = Deck::parse(html, &DeckOptions::default()).unwrap();
//! assert_eq!(deck.slide_count(), 2);
//!
//! let location = UrlLocation::parse("https://example.org/talk.html").unwrap();
//! let mut presenter = deck.present(location);
//! presenter.handle(&"ArrowRight".parse::<InputEvent>().unwrap());
//!
//! assert_eq!(presenter.navigator().current_index(), 1);
//! assert_eq!(presenter.location().href(), "https://example.org/talk.html?slide=2");
//! ```
//!
//! ## Pieces
//!
//! - [`segment`]: the one-shot marker to container transformation
//! - [`navigator`]: index state, wrap-around, URL synchronisation
//! - [`render`]: the [`Renderer`] seam and the class-tag renderer
//! - [`location`]: query parameter encoding and the [`Location`] seam
//! - [`input`]: keyboard, click and touch handling
//! - [`menu`]: the companion page menu
//!
//! Navigation and tag logic are independent of any DOM; pair a
//! [`ClassRenderer`] with a [`MemorySurface`] to drive it headless.

pub mod deck;
mod error;
pub mod input;
pub mod location;
pub mod menu;
pub mod navigator;
pub mod render;
pub mod segment;
pub mod tags;

pub use deck::{Deck, DeckOptions, Presenter};
pub use error::{DeckError, DeckResult};
pub use input::{Command, Controls, InputEvent, InputRouter, Key, SwipeGesture};
pub use location::{IndexBase, Location, SlideParam, UrlLocation};
pub use menu::{DomMenu, MenuToggle};
pub use navigator::Navigator;
pub use render::{
  ClassRenderer,
  DomSurface,
  MemorySurface,
  Renderer,
  SlideSurface,
  Transition,
};
pub use segment::{LeadingContent, SegmentOptions, Segmenter};
pub use tags::Direction;
