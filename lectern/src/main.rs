use std::{
  fs,
  io::{self, Write},
};

use color_eyre::eyre::{Context, Result, bail};
use lectern::{
  cli::{Cli, Commands},
  config::Config,
  utils::{self, DeckReport},
};
use log::{LevelFilter, info, warn};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Commands::Init {
      output,
      format,
      force,
    } => {
      if output.exists() && !force {
        bail!(
          "Configuration file already exists: {}. Use --force to overwrite.",
          output.display()
        );
      }

      if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
          fs::create_dir_all(parent).wrap_err_with(|| {
            format!("Failed to create directory: {}", parent.display())
          })?;
          info!("Created directory: {}", parent.display());
        }
      }

      Config::generate_default_config(format, output).wrap_err_with(|| {
        format!("Failed to generate configuration file: {}", output.display())
      })?;
      Ok(())
    },

    Commands::Build { .. } => {
      let config = Config::load(&cli)?;
      let report = utils::build_deck(&config)?;
      log_report(&report);
      Ok(())
    },

    Commands::Navigate { events, .. } => {
      let config = Config::load(&cli)?;
      let report = utils::navigate_deck(&config, events)?;
      log_report(&report);

      // The final address is the command's result, keep it on stdout
      let mut stdout = io::stdout().lock();
      writeln!(stdout, "{}", report.url)?;
      Ok(())
    },
  }
}

fn log_report(report: &DeckReport) {
  if report.slide_count == 0 {
    warn!("No slide separators found, nothing to present");
    return;
  }
  info!(
    "Showing slide {} of {} at {}",
    report.index + 1,
    report.slide_count,
    report.url
  );
}
