//! Partitioning of a flat, rule-delimited document into slide containers.
//!
//! The segmenter repeatedly takes the *last* remaining marker, so that the
//! following siblings of any marker never include content already claimed by
//! a later one. Claiming stops at the first sibling that is, or holds, a slide
//! container, so containers never nest. Every claimed node is moved exactly
//! once, and containers end up in the same order as the markers they replace.

use kuchikikiki::{Attribute, ExpandedName, NodeRef, Selectors};
use log::{debug, trace};
use markup5ever::{LocalName, QualName, local_name, ns};

use crate::{
  error::{DeckError, DeckResult},
  tags::ClassList,
};

/// What happens to content that precedes the first marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeadingContent {
  /// Leave it in place, outside every slide (page header, title, etc).
  #[default]
  Keep,
  /// Gather it into its own slide, placed before the first marker's slide.
  Slide,
}

/// Options controlling how markers are found and containers are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentOptions {
  /// CSS selector matching separator markers.
  pub marker: String,

  /// Tag name of created slide containers.
  pub container_tag: String,

  /// Class identifying slide containers.
  pub container_class: String,

  /// Optional class of an inner wrapper holding the moved content, so the
  /// container can be laid out independently of its content.
  pub wrapper_class: Option<String>,

  /// Handling of content before the first marker.
  pub leading: LeadingContent,
}

impl Default for SegmentOptions {
  fn default() -> Self {
    Self {
      marker:          "hr".to_owned(),
      container_tag:   "section".to_owned(),
      container_class: "slide".to_owned(),
      wrapper_class:   None,
      leading:         LeadingContent::Keep,
    }
  }
}

impl SegmentOptions {
  /// Selector matching slide containers.
  #[must_use]
  pub fn container_selector(&self) -> String {
    format!("{}.{}", self.container_tag, self.container_class)
  }

  /// Checks that the marker compiles as a selector and that the container
  /// tag and class are single CSS identifiers.
  ///
  /// # Errors
  ///
  /// Returns [`DeckError::InvalidSelector`] carrying the offending part.
  pub fn validate(&self) -> DeckResult<()> {
    Selectors::compile(&self.marker)
      .map_err(|()| DeckError::InvalidSelector(self.marker.clone()))?;
    for part in [&self.container_tag, &self.container_class] {
      if !is_identifier(part) {
        return Err(DeckError::InvalidSelector(part.clone()));
      }
    }
    Ok(())
  }
}

fn is_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  chars
    .next()
    .is_some_and(|first| !first.is_ascii_digit() && is_name_char(first))
    && chars.all(is_name_char)
}

fn is_name_char(c: char) -> bool {
  c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

/// One-shot transformation of markers into slide containers.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
  options: SegmentOptions,
}

impl Segmenter {
  #[must_use]
  pub const fn new(options: SegmentOptions) -> Self {
    Self { options }
  }

  #[must_use]
  pub const fn options(&self) -> &SegmentOptions {
    &self.options
  }

  /// Converts every marker in `document` into a slide container and returns
  /// all slide containers in document order.
  ///
  /// This is destructive: markers are detached and content is moved. Running
  /// it again on a document without markers changes nothing.
  ///
  /// # Errors
  ///
  /// Returns [`DeckError::InvalidSelector`] if the marker selector cannot be
  /// parsed or the container tag or class is not a CSS identifier.
  pub fn segment(&self, document: &NodeRef) -> DeckResult<Vec<NodeRef>> {
    self.options.validate()?;

    let mut created = 0usize;
    let mut first_created = None;

    while let Some(marker) = self.last_marker(document)? {
      let container = self.new_container();
      let target = self.content_target(&container);

      // Collected up front, moving nodes rewires the sibling links.
      let claimed: Vec<NodeRef> = marker
        .following_siblings()
        .take_while(|sibling| !self.holds_container(sibling))
        .collect();
      trace!("Marker claims {} sibling node(s)", claimed.len());
      for node in claimed {
        node.detach();
        target.append(node);
      }

      marker.insert_after(container.clone());
      marker.detach();
      first_created = Some(container);
      created += 1;
    }

    if self.options.leading == LeadingContent::Slide {
      if let Some(first) = &first_created {
        self.gather_leading(first);
      }
    }

    let slides = self.slides(document)?;
    debug!(
      "Segmented {created} marker(s) into {} slide container(s)",
      slides.len()
    );
    Ok(slides)
  }

  /// Collects existing slide containers in document order.
  ///
  /// # Errors
  ///
  /// Returns [`DeckError::InvalidSelector`] if the configured container tag
  /// or class does not form a valid selector.
  pub fn slides(&self, document: &NodeRef) -> DeckResult<Vec<NodeRef>> {
    let selector = self.options.container_selector();
    let slides = document
      .select(&selector)
      .map_err(|()| DeckError::InvalidSelector(selector.clone()))?
      .map(|element| element.as_node().clone())
      .collect();
    Ok(slides)
  }

  /// Whether `node` is a slide container, created by us or pre-existing.
  #[must_use]
  pub fn is_container(&self, node: &NodeRef) -> bool {
    node.as_element().is_some_and(|element| {
      element.name.local.as_ref() == self.options.container_tag
        && ClassList::new(element).contains(&self.options.container_class)
    })
  }

  fn holds_container(&self, node: &NodeRef) -> bool {
    node
      .inclusive_descendants()
      .any(|descendant| self.is_container(&descendant))
  }

  fn last_marker(&self, document: &NodeRef) -> DeckResult<Option<NodeRef>> {
    let markers = document
      .select(&self.options.marker)
      .map_err(|()| DeckError::InvalidSelector(self.options.marker.clone()))?;
    Ok(markers.last().map(|marker| marker.as_node().clone()))
  }

  fn new_container(&self) -> NodeRef {
    element(
      LocalName::from(self.options.container_tag.as_str()),
      &self.options.container_class,
    )
  }

  /// Returns the node that receives moved content: the wrapper if one is
  /// configured, otherwise the container itself.
  fn content_target(&self, container: &NodeRef) -> NodeRef {
    match &self.options.wrapper_class {
      Some(class) => {
        let wrapper = element(local_name!("div"), class);
        container.append(wrapper.clone());
        wrapper
      },
      None => container.clone(),
    }
  }

  fn gather_leading(&self, first: &NodeRef) {
    let mut leading: Vec<NodeRef> = first
      .preceding_siblings()
      .take_while(|sibling| !self.is_container(sibling))
      .collect();
    if !leading.iter().any(is_meaningful) {
      return;
    }
    leading.reverse();

    let container = self.new_container();
    let target = self.content_target(&container);
    for node in leading {
      node.detach();
      target.append(node);
    }
    first.insert_before(container);
    debug!("Gathered leading content into its own slide");
  }
}

fn element(name: LocalName, class: &str) -> NodeRef {
  NodeRef::new_element(QualName::new(None, ns!(html), name), vec![(
    ExpandedName::new("", "class"),
    Attribute {
      prefix: None,
      value:  class.to_owned(),
    },
  )])
}

fn is_meaningful(node: &NodeRef) -> bool {
  node.as_element().is_some()
    || node
      .as_text()
      .is_some_and(|text| !text.borrow().trim().is_empty())
}
