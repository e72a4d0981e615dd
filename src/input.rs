use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;

use crate::error::ConvertError;
use crate::track::{load_gpx, TrackGroups};

fn is_gpx(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|x| x.eq_ignore_ascii_case("gpx"))
        .unwrap_or(false)
}

/// Entries of `dir` sorted by file name, so discovery order does not depend on
/// the filesystem.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| ConvertError::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| ConvertError::io(dir, e))?;
    entries.sort();
    Ok(entries)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// One group per file, named by the path as given.
pub fn groups_from_files<P: AsRef<Path>>(paths: &[P]) -> Result<TrackGroups> {
    let mut groups = TrackGroups::new();
    for path in paths {
        let path = path.as_ref();
        groups.add(path.display().to_string(), load_gpx(path)?);
    }
    Ok(groups)
}

/// One group per immediate subdirectory of `dir` (one person each), holding the
/// points of every GPX file directly inside it, in file name order.
pub fn groups_from_directory<P: AsRef<Path>>(dir: P) -> Result<TrackGroups> {
    let dir = dir.as_ref();
    let mut groups = TrackGroups::new();
    for entry in sorted_entries(dir)? {
        if !entry.is_dir() {
            warn!("skipping {}, not a directory", entry.display());
            continue;
        }
        let name = display_name(&entry);
        let mut points = Vec::new();
        for file in sorted_entries(&entry)? {
            if file.is_file() && is_gpx(&file) {
                points.extend(load_gpx(&file)?);
            } else {
                debug!("ignoring {}", file.display());
            }
        }
        debug!("{}: {} points", name, points.len());
        groups.add(name, points);
    }
    Ok(groups)
}
