use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

const TABULA_JAR: &str = "tabula.jar";
const XDG_PREFIX: &str = "tabulacsv";

/// Resolves the Tabula JAR file to use.
///
/// An explicitly given path always wins. Otherwise a JAR next to the executable (as in a
/// distribution) is preferred over one installed into the XDG data directories.
pub fn resolve_tabula_jar(explicit: Option<&Path>) -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(XDG_PREFIX);
    pick_tabula_jar(explicit, dist_file(TABULA_JAR), xdg_dirs.find_data_file(TABULA_JAR))
}

fn pick_tabula_jar(
    explicit: Option<&Path>,
    dist: Option<PathBuf>,
    xdg_data: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(explicit) = explicit {
        return Ok(explicit.to_owned());
    }
    match dist.or(xdg_data) {
        Some(path) => Ok(path),
        None => bail!(
            "could not find {TABULA_JAR} next to the executable or in the XDG data directories \
            (under {XDG_PREFIX:?}), specify its location with --tabula-libpath"
        ),
    }
}

/// Returns a possible path to a file that is part of a distribution, assuming that the process
/// is running as part of one.
fn dist_file(file_name: &str) -> Option<PathBuf> {
    let mut exec_path = std::env::current_exe().ok()?;
    exec_path.set_file_name(file_name);
    if !exec_path.is_file() {
        return None;
    }
    Some(exec_path)
}
