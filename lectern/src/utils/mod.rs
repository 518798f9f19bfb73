pub mod assets;

use std::{
  fs,
  io::{self, Write},
  path::Path,
};

use color_eyre::eyre::{Context, Result, bail, eyre};
use lectern_deck::{Deck, InputEvent, UrlLocation};
use log::{debug, info};
use url::Url;

use crate::config::Config;

/// Where a deck ended up after building or navigating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckReport {
  /// Page URL with the slide parameter written back.
  pub url:         String,
  /// Zero-based index of the slide on screen.
  pub index:       usize,
  pub slide_count: usize,
}

/// Resolves the page URL the deck is presented at.
///
/// An explicit URL wins; otherwise the input document's `file://` URL is
/// used.
///
/// # Errors
///
/// Returns an error if the URL does not parse or the input path cannot be
/// turned into one.
pub fn page_location(config: &Config) -> Result<UrlLocation> {
  if let Some(url) = &config.url {
    return UrlLocation::parse(url)
      .wrap_err_with(|| format!("Invalid page URL: {url}"));
  }

  let Some(input) = &config.input else {
    bail!("No input document given");
  };
  let absolute = fs::canonicalize(input)
    .wrap_err_with(|| format!("Failed to resolve {}", input.display()))?;
  let url = Url::from_file_path(&absolute).map_err(|()| {
    eyre!("Cannot express {} as a file URL", absolute.display())
  })?;
  Ok(UrlLocation::new(url))
}

fn load_deck(config: &Config) -> Result<Deck> {
  let Some(input) = &config.input else {
    bail!("No input document given");
  };
  let html = fs::read_to_string(input)
    .wrap_err_with(|| format!("Failed to read {}", input.display()))?;
  debug!("Read {} bytes from {}", html.len(), input.display());

  Deck::parse(&html, &config.deck_options())
    .wrap_err_with(|| format!("Failed to segment {}", input.display()))
}

/// Segments the input document, links assets, renders the starting slide and
/// writes the result.
///
/// # Errors
///
/// Returns an error if the input cannot be read or segmented, an asset
/// cannot be copied, or the output cannot be written.
pub fn build_deck(config: &Config) -> Result<DeckReport> {
  let deck = load_deck(config)?;

  let output = config.output.as_deref();
  deck.inject_stylesheets(&assets::resolve_assets(
    &config.stylesheet_paths,
    output,
  )?);
  deck.inject_scripts(&assets::resolve_assets(&config.script_paths, output)?);

  let presenter = deck.present(page_location(config)?);
  let report = DeckReport {
    url:         presenter.location().href().to_owned(),
    index:       presenter.navigator().current_index(),
    slide_count: deck.slide_count(),
  };

  write_document(&deck.to_html()?, output)?;
  Ok(report)
}

/// Replays `events` against the input document.
///
/// Every event is parsed before anything is replayed, so a typo does not
/// leave a half-navigated deck behind.
///
/// # Errors
///
/// Returns an error if an event is malformed, the input cannot be read or
/// segmented, or the output cannot be written.
pub fn navigate_deck(config: &Config, events: &[String]) -> Result<DeckReport> {
  let events = events
    .iter()
    .map(|event| event.parse::<InputEvent>())
    .collect::<Result<Vec<_>, _>>()?;

  let deck = load_deck(config)?;
  let mut presenter = deck.present(page_location(config)?);
  for event in &events {
    presenter.handle(event);
  }
  info!("Replayed {} event(s)", events.len());

  if let Some(output) = &config.output {
    write_document(&deck.to_html()?, Some(output))?;
  }

  Ok(DeckReport {
    url:         presenter.location().href().to_owned(),
    index:       presenter.navigator().current_index(),
    slide_count: deck.slide_count(),
  })
}

/// Writes `html` to `output`, creating parent directories, or to standard
/// output when no path is given.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_document(html: &str, output: Option<&Path>) -> Result<()> {
  let Some(output) = output else {
    let mut stdout = io::stdout().lock();
    stdout.write_all(html.as_bytes())?;
    return stdout.flush().wrap_err("Failed to write to standard output");
  };

  if let Some(parent) = output.parent() {
    if !parent.as_os_str().is_empty() && !parent.exists() {
      fs::create_dir_all(parent).wrap_err_with(|| {
        format!("Failed to create directory: {}", parent.display())
      })?;
      info!("Created directory: {}", parent.display());
    }
  }

  fs::write(output, html)
    .wrap_err_with(|| format!("Failed to write {}", output.display()))?;
  info!("Wrote {}", output.display());
  Ok(())
}
