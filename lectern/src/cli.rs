use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for lectern
#[derive(Parser, Debug)]
#[command(author, version, about = "lectern: rule-delimited HTML slide decks")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to a configuration file (TOML or JSON). When omitted, lectern
  /// looks for one in the usual locations.
  #[arg(short = 'c', long = "config-file", global = true)]
  pub config_file: Option<PathBuf>,
}

/// All supported subcommands for the lectern CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new lectern configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "lectern.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Segment an HTML document into slides and render the starting slide.
  Build {
    /// HTML document with rule-delimited sections.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the resulting document. Standard output when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Page URL the deck is presented at. Its slide parameter selects the
    /// starting slide.
    #[arg(short, long)]
    url: Option<String>,

    /// CSS selector of the slide separators.
    #[arg(short, long)]
    marker: Option<String>,

    /// Wrap each slide's content in an element with this class.
    #[arg(long = "wrapper-class")]
    wrapper_class: Option<String>,

    /// Turn content before the first separator into its own slide.
    #[arg(long = "leading-slide")]
    leading_slide: bool,

    /// Stylesheet to link from the document (can be specified multiple
    /// times)
    #[arg(short, long, action = clap::ArgAction::Append)]
    stylesheet: Vec<PathBuf>,

    /// Script to load from the document (can be specified multiple times)
    #[arg(long, action = clap::ArgAction::Append)]
    script: Vec<PathBuf>,
  },

  /// Replay input events against a deck and report where it ends up.
  Navigate {
    /// HTML document with rule-delimited sections.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Page URL the deck is presented at.
    #[arg(short, long)]
    url: Option<String>,

    /// Write the resulting document here.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Events to replay in order: `ArrowLeft`, `ArrowRight`, `key:<name>`,
    /// `click:<id>`, `touchstart:<x>`, `touchmove:<x>`.
    #[arg(value_name = "EVENT", allow_hyphen_values = true)]
    events: Vec<String>,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
