//! A segmented document together with everything needed to present it.

use kuchikikiki::{Attribute, ExpandedName, NodeRef};
use log::{debug, info};
use markup5ever::{QualName, local_name, ns};
use tendril::TendrilSink;

use crate::{
  error::{DeckError, DeckResult},
  input::{Controls, InputEvent, InputRouter, SWIPE_THRESHOLD, SwipeGesture},
  location::{Location, SlideParam},
  menu::{DomMenu, MenuToggle},
  navigator::Navigator,
  render::{ClassRenderer, DomSurface},
  segment::{SegmentOptions, Segmenter},
};

/// Everything configurable about a deck.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckOptions {
  pub segment:            SegmentOptions,
  pub param:              SlideParam,
  pub controls:           Controls,
  pub swipe_threshold:    f64,
  /// Selector of the element showing `n / total`, if any.
  pub indicator_selector: Option<String>,
  /// Selector of the companion menu element, if any.
  pub menu_selector:      Option<String>,
  /// Element id of the menu toggler.
  pub menu_toggler:       String,
}

impl Default for DeckOptions {
  fn default() -> Self {
    Self {
      segment:            SegmentOptions::default(),
      param:              SlideParam::default(),
      controls:           Controls::default(),
      swipe_threshold:    SWIPE_THRESHOLD,
      indicator_selector: Some("#slide-number".to_owned()),
      menu_selector:      Some("#menu".to_owned()),
      menu_toggler:       "menu-toggler".to_owned(),
    }
  }
}

/// A parsed and segmented HTML document.
#[derive(Debug, Clone)]
pub struct Deck {
  document:  NodeRef,
  slides:    Vec<NodeRef>,
  indicator: Option<NodeRef>,
  menu:      Option<NodeRef>,
  options:   DeckOptions,
}

impl Deck {
  /// Parses `html` and segments it into slides.
  ///
  /// # Errors
  ///
  /// Returns [`DeckError::InvalidSelector`] if any configured selector is
  /// malformed.
  pub fn parse(html: &str, options: &DeckOptions) -> DeckResult<Self> {
    let document = kuchikikiki::parse_html().one(html);
    let slides = Segmenter::new(options.segment.clone()).segment(&document)?;
    let indicator = find(&document, options.indicator_selector.as_deref())?;
    let menu = find(&document, options.menu_selector.as_deref())?;

    info!("Deck has {} slide(s)", slides.len());
    Ok(Self {
      document,
      slides,
      indicator,
      menu,
      options: options.clone(),
    })
  }

  #[must_use]
  pub fn slide_count(&self) -> usize {
    self.slides.len()
  }

  /// Slide containers in document order.
  #[must_use]
  pub fn slides(&self) -> &[NodeRef] {
    &self.slides
  }

  #[must_use]
  pub const fn document(&self) -> &NodeRef {
    &self.document
  }

  /// Starts presenting the deck at `location`.
  ///
  /// The returned presenter is already initialized: the starting slide has
  /// been rendered and written back into the location.
  pub fn present<L: Location>(&self, location: L) -> Presenter<L> {
    let surface = DomSurface::new(self.slides.clone(), self.indicator.clone());
    let mut navigator = Navigator::new(
      self.slides.len(),
      ClassRenderer::new(surface),
      location,
      self.options.param.clone(),
    );
    navigator.initialize();

    Presenter {
      navigator,
      router: InputRouter::new(
        self.options.controls.clone(),
        SwipeGesture::new(self.options.swipe_threshold),
      ),
      menu: DomMenu::new(
        MenuToggle::new(self.options.menu_toggler.as_str()),
        self.menu.clone(),
      ),
    }
  }

  /// Appends a `<link rel="stylesheet">` per href to the document head.
  pub fn inject_stylesheets(&self, hrefs: &[String]) {
    for href in hrefs {
      self.append_to_head(html_element(local_name!("link"), &[
        ("rel", "stylesheet"),
        ("href", href),
      ]));
    }
  }

  /// Appends a `<script src>` per source to the document head.
  pub fn inject_scripts(&self, sources: &[String]) {
    for src in sources {
      self.append_to_head(html_element(local_name!("script"), &[("src", src)]));
    }
  }

  /// Serializes the document, including any presentation state applied so
  /// far.
  ///
  /// # Errors
  ///
  /// Returns an error if serialization fails.
  pub fn to_html(&self) -> DeckResult<String> {
    let mut out = Vec::new();
    self.document.serialize(&mut out)?;
    Ok(String::from_utf8(out)?)
  }

  fn append_to_head(&self, node: NodeRef) {
    match self.document.select_first("head") {
      Ok(head) => head.as_node().append(node),
      Err(()) => self.document.append(node),
    }
  }
}

/// A running presentation: navigation, input routing and the page menu.
#[derive(Debug)]
pub struct Presenter<L> {
  navigator: Navigator<ClassRenderer<DomSurface>, L>,
  router:    InputRouter,
  menu:      DomMenu,
}

impl<L: Location> Presenter<L> {
  /// Handles one input event.
  pub fn handle(&mut self, event: &InputEvent) {
    if let InputEvent::Click { target } = event {
      self.menu.click(target);
    }
    if let Some(command) = self.router.route(event) {
      debug!("{event:?} triggers {command:?}");
      self.navigator.dispatch(command);
    }
  }

  #[must_use]
  pub const fn navigator(&self) -> &Navigator<ClassRenderer<DomSurface>, L> {
    &self.navigator
  }

  pub const fn navigator_mut(
    &mut self,
  ) -> &mut Navigator<ClassRenderer<DomSurface>, L> {
    &mut self.navigator
  }

  #[must_use]
  pub fn menu_open(&self) -> bool {
    self.menu.state().is_open()
  }

  #[must_use]
  pub const fn location(&self) -> &L {
    self.navigator.location()
  }
}

fn find(document: &NodeRef, selector: Option<&str>) -> DeckResult<Option<NodeRef>> {
  let Some(selector) = selector else {
    return Ok(None);
  };
  let mut matches = document
    .select(selector)
    .map_err(|()| DeckError::InvalidSelector(selector.to_owned()))?;
  Ok(matches.next().map(|element| element.as_node().clone()))
}

fn html_element(
  name: markup5ever::LocalName,
  attributes: &[(&str, &str)],
) -> NodeRef {
  NodeRef::new_element(
    QualName::new(None, ns!(html), name),
    attributes.iter().map(|(key, value)| {
      (ExpandedName::new("", *key), Attribute {
        prefix: None,
        value:  (*value).to_owned(),
      })
    }),
  )
}
