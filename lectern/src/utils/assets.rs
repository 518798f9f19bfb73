use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result, bail};
use log::debug;

/// Directory, relative to the output document, that local assets land in.
pub const ASSETS_DIR: &str = "assets";

/// Resolves asset references into hrefs for the output document.
///
/// Remote references (anything with a URL scheme) are linked as given. Local
/// files are copied into an `assets` directory next to `output` and linked
/// relative to it. Without an output file nothing is copied and local paths
/// are linked verbatim.
///
/// # Errors
///
/// Returns an error if a local asset is missing or cannot be copied.
pub fn resolve_assets(
  paths: &[PathBuf],
  output: Option<&Path>,
) -> Result<Vec<String>> {
  let assets_dir = output.map(|output| {
    output
      .parent()
      .unwrap_or_else(|| Path::new(""))
      .join(ASSETS_DIR)
  });

  paths
    .iter()
    .map(|path| {
      let reference = path.to_string_lossy();
      if is_remote(&reference) {
        return Ok(reference.into_owned());
      }
      match &assets_dir {
        Some(assets_dir) => copy_asset(path, assets_dir),
        None => Ok(reference.into_owned()),
      }
    })
    .collect()
}

fn is_remote(reference: &str) -> bool {
  reference
    .split_once("://")
    .is_some_and(|(scheme, _)| {
      !scheme.is_empty() && scheme.chars().all(|c| c.is_ascii_alphanumeric())
    })
}

fn copy_asset(path: &Path, assets_dir: &Path) -> Result<String> {
  if !path.is_file() {
    bail!("Asset does not exist: {}", path.display());
  }
  let Some(file_name) = path.file_name() else {
    bail!("Asset path has no file name: {}", path.display());
  };

  fs::create_dir_all(assets_dir).wrap_err_with(|| {
    format!("Failed to create assets directory: {}", assets_dir.display())
  })?;
  let target = assets_dir.join(file_name);
  fs::copy(path, &target).wrap_err_with(|| {
    format!("Failed to copy {} to {}", path.display(), target.display())
  })?;
  debug!("Copied asset {} to {}", path.display(), target.display());

  Ok(format!("{ASSETS_DIR}/{}", file_name.to_string_lossy()))
}
