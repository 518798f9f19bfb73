use std::{
  fs,
  path::{Path, PathBuf},
};

use lectern_deck::{
  Controls,
  DeckOptions,
  IndexBase,
  LeadingContent,
  SegmentOptions,
  SlideParam,
  input::SWIPE_THRESHOLD,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
  cli::{Cli, Commands},
  error::ConfigError,
};

/// Configuration file names looked up in the working directory, in order.
const CONFIG_FILENAMES: [&str; 5] = [
  "lectern.toml",
  "lectern.json",
  ".lectern.toml",
  ".lectern.json",
  ".config/lectern.toml",
];

/// Configuration options for lectern.
///
/// Every field has a default, so a configuration file only needs the values
/// it changes. CLI flags override whatever the file says.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// HTML document to segment.
  pub input: Option<PathBuf>,

  /// Where to write the segmented document. Standard output when unset.
  pub output: Option<PathBuf>,

  /// Page URL the deck is presented at.
  pub url: Option<String>,

  /// CSS selector of the slide separators.
  pub marker: String,

  /// Tag name of slide containers.
  pub container_tag: String,

  /// Class identifying slide containers.
  pub container_class: String,

  /// Class of an optional wrapper around each slide's content.
  pub wrapper_class: Option<String>,

  /// Whether content before the first separator forms its own slide.
  pub leading_slide: bool,

  /// Query parameter holding the current slide.
  pub param_name: String,

  /// Whether the query parameter counts slides from one.
  pub one_based: bool,

  /// Horizontal travel in CSS pixels before a drag counts as a swipe.
  pub swipe_threshold: f64,

  /// Element id of the "previous slide" control.
  pub previous_control: String,

  /// Element id of the "next slide" control.
  pub next_control: String,

  /// Selector of the element showing the slide number.
  pub indicator_selector: Option<String>,

  /// Selector of the page menu.
  pub menu_selector: Option<String>,

  /// Element id of the menu toggler.
  pub menu_toggler: String,

  /// Stylesheets to link from the document.
  pub stylesheet_paths: Vec<PathBuf>,

  /// Scripts to load from the document.
  pub script_paths: Vec<PathBuf>,
}

impl Default for Config {
  fn default() -> Self {
    let deck = DeckOptions::default();
    Self {
      input:              None,
      output:             None,
      url:                None,
      marker:             deck.segment.marker,
      container_tag:      deck.segment.container_tag,
      container_class:    deck.segment.container_class,
      wrapper_class:      deck.segment.wrapper_class,
      leading_slide:      false,
      param_name:         deck.param.name,
      one_based:          true,
      swipe_threshold:    SWIPE_THRESHOLD,
      previous_control:   deck.controls.previous,
      next_control:       deck.controls.next,
      indicator_selector: deck.indicator_selector,
      menu_selector:      deck.menu_selector,
      menu_toggler:       deck.menu_toggler,
      stylesheet_paths:   Vec::new(),
      script_paths:       Vec::new(),
    }
  }
}

impl Config {
  /// Create a new configuration from a file.
  /// Only TOML and JSON are supported.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, has an unsupported
  /// extension, or does not parse.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase);
    match extension.as_deref() {
      Some("json") => Ok(serde_json::from_str(&content)?),
      Some("toml") => Ok(toml::from_str(&content)?),
      Some(_) => {
        Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
      None => {
        Err(ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }

  /// Load config from file and CLI arguments.
  ///
  /// # Errors
  ///
  /// Returns an error if a configuration file fails to load, or if the
  /// merged configuration names no input document or one that does not
  /// exist.
  pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
    let mut config = if let Some(config_path) = &cli.config_file {
      Self::from_file(config_path)?
    } else if let Some(discovered) = Self::find_config_file() {
      info!("Using discovered config file: {}", discovered.display());
      Self::from_file(&discovered)?
    } else {
      Self::default()
    };

    config.merge_with_cli(cli);
    config.validate()?;
    Ok(config)
  }

  /// Merge CLI arguments into this config, prioritizing CLI values when
  /// present.
  pub fn merge_with_cli(&mut self, cli: &Cli) {
    match &cli.command {
      Commands::Build {
        input,
        output,
        url,
        marker,
        wrapper_class,
        leading_slide,
        stylesheet,
        script,
      } => {
        self.merge_paths(input.as_ref(), output.as_ref(), url.as_ref());

        if let Some(marker) = marker {
          self.marker.clone_from(marker);
        }

        if let Some(wrapper_class) = wrapper_class {
          self.wrapper_class = Some(wrapper_class.clone());
        }

        if *leading_slide {
          self.leading_slide = true;
        }

        // Append rather than replace, the file may list shared assets
        self.stylesheet_paths.extend(stylesheet.iter().cloned());
        self.script_paths.extend(script.iter().cloned());
      },
      Commands::Navigate {
        input, url, output, ..
      } => {
        self.merge_paths(input.as_ref(), output.as_ref(), url.as_ref());
      },
      Commands::Init { .. } => {},
    }
  }

  fn merge_paths(
    &mut self,
    input: Option<&PathBuf>,
    output: Option<&PathBuf>,
    url: Option<&String>,
  ) {
    if let Some(input) = input {
      self.input = Some(input.clone());
    }
    if let Some(output) = output {
      self.output = Some(output.clone());
    }
    if let Some(url) = url {
      self.url = Some(url.clone());
    }
  }

  /// Search for config files in common locations.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    if let Some(path) = CONFIG_FILENAMES
      .iter()
      .map(|filename| current_dir.join(filename))
      .find(|path| path.exists())
    {
      return Some(path);
    }

    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
      let path = PathBuf::from(xdg_config_home).join("lectern.toml");
      if path.exists() {
        return Some(path);
      }
    }

    if let Ok(home) = std::env::var("HOME") {
      let path = PathBuf::from(home)
        .join(".config")
        .join("lectern")
        .join("config.toml");
      if path.exists() {
        return Some(path);
      }
    }

    None
  }

  /// Validate the merged configuration.
  ///
  /// # Errors
  ///
  /// Returns an error describing every problem found.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    match &self.input {
      None => errors.push("No input document given".to_owned()),
      Some(input) if !input.is_file() => {
        errors.push(format!("Input document does not exist: {}", input.display()));
      },
      Some(_) => {},
    }

    if self.marker.trim().is_empty() {
      errors.push("Marker selector must not be empty".to_owned());
    }

    if let Err(err) = self.deck_options().segment.validate() {
      errors.push(format!("Invalid slide layout: {err}"));
    }

    if self.param_name.is_empty() {
      errors.push("Query parameter name must not be empty".to_owned());
    }

    if !(self.swipe_threshold.is_finite() && self.swipe_threshold >= 0.0) {
      errors.push(format!(
        "Swipe threshold must be a non-negative number, got {}",
        self.swipe_threshold
      ));
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(ConfigError::Config(errors.join("\n")))
    }
  }

  /// Converts the configuration into options for the deck library.
  #[must_use]
  pub fn deck_options(&self) -> DeckOptions {
    DeckOptions {
      segment:            SegmentOptions {
        marker:          self.marker.clone(),
        container_tag:   self.container_tag.clone(),
        container_class: self.container_class.clone(),
        wrapper_class:   self.wrapper_class.clone(),
        leading:         if self.leading_slide {
          LeadingContent::Slide
        } else {
          LeadingContent::Keep
        },
      },
      param:              SlideParam {
        name: self.param_name.clone(),
        base: if self.one_based {
          IndexBase::One
        } else {
          IndexBase::Zero
        },
      },
      controls:           Controls {
        previous: self.previous_control.clone(),
        next:     self.next_control.clone(),
      },
      swipe_threshold:    self.swipe_threshold,
      indicator_selector: self.indicator_selector.clone(),
      menu_selector:      self.menu_selector.clone(),
      menu_toggler:       self.menu_toggler.clone(),
    }
  }

  /// Writes the default configuration to `path` in the given format.
  ///
  /// # Errors
  ///
  /// Returns an error for unknown formats, or if serialization or writing
  /// fails.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let defaults = Self::default();
    let content = match format {
      "toml" => {
        format!(
          "# lectern configuration\n# Every key is optional, CLI flags take \
           precedence.\n\n{}",
          toml::to_string_pretty(&defaults)?
        )
      },
      "json" => serde_json::to_string_pretty(&defaults)?,
      other => {
        return Err(ConfigError::Config(format!(
          "Unsupported config format: {other}"
        )));
      },
    };

    fs::write(path, content)?;
    debug!("Wrote {format} configuration to {}", path.display());
    info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}
