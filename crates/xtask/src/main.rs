use std::{
  fs,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate_to};
use clap_mangen::Man;

const BIN_NAME: &str = "lectern";

#[derive(Parser)]
#[command(author, version, about)]
struct Xtask {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build distribution artifacts for the lectern CLI
  Dist {
    /// Output directory for generated files.
    #[arg(short, long, default_value = "dist")]
    output_dir: PathBuf,

    /// Generate only one kind of artifact.
    #[arg(long, value_enum)]
    only: Option<Artifact>,
  },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Artifact {
  Completions,
  Manpages,
}

#[allow(clippy::print_stdout, reason = "xtask reports to the terminal")]
fn main() -> Result<()> {
  let Commands::Dist { output_dir, only } = Xtask::parse().command;

  if only != Some(Artifact::Manpages) {
    let dir = generate_completions(&output_dir)?;
    println!("Shell completions generated in {}", dir.display());
  }
  if only != Some(Artifact::Completions) {
    let dir = generate_manpages(&output_dir)?;
    println!("Manpages generated in {}", dir.display());
  }

  Ok(())
}

fn generate_completions(output_dir: &Path) -> Result<PathBuf> {
  let dir = output_dir.join("completions");
  fs::create_dir_all(&dir)?;
  let mut cmd = lectern::cli::Cli::command();
  for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
    generate_to(shell, &mut cmd, BIN_NAME, &dir)
      .with_context(|| format!("Failed to generate {shell} completions"))?;
  }
  Ok(dir)
}

/// Renders `lectern.1` plus one page per subcommand (`lectern-build.1`, ...).
fn generate_manpages(output_dir: &Path) -> Result<PathBuf> {
  let dir = output_dir.join("man");
  fs::create_dir_all(&dir)?;

  let cmd = lectern::cli::Cli::command();
  render_manpage(&dir, BIN_NAME, cmd.clone())?;
  for sub in cmd.get_subcommands() {
    let name = format!("{BIN_NAME}-{}", sub.get_name());
    render_manpage(&dir, &name, sub.clone())?;
  }
  Ok(dir)
}

fn render_manpage(dir: &Path, name: &str, cmd: Command) -> Result<()> {
  let path = dir.join(format!("{name}.1"));
  let mut file = fs::File::create(&path).with_context(|| {
    format!("Failed to create manpage file at {}", path.display())
  })?;
  Man::new(cmd)
    .title(name.to_uppercase())
    .render(&mut file)
    .with_context(|| format!("Failed to render manpage {name}"))
}
