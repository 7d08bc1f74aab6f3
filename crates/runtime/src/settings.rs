use std::{
    collections::BTreeSet,
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Serialize};

/// One config document: the list of roots to index.
///
/// Multiple config files may be supplied; their directory lists are
/// unioned, so a root named in two files is scanned once.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub directories: Vec<PathBuf>,
}

impl Settings {
    pub fn load(path: &Path) -> io::Result<Settings> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(io::Error::other)
    }

    /// Load every config file and union their directory lists.
    pub fn load_all(paths: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
        let mut roots = BTreeSet::new();
        for path in paths {
            let settings = Settings::load(path)?;
            debug!(
                "loaded {} director{} from {}",
                settings.directories.len(),
                if settings.directories.len() == 1 { "y" } else { "ies" },
                path.display()
            );
            roots.extend(settings.directories);
        }
        Ok(roots.into_iter().collect())
    }
}

/// Render a sample config document suitable for `--print-sample-config`.
pub fn sample_config() -> String {
    let sample = Settings {
        directories: vec![
            PathBuf::from("/mnt/mydisk"),
            PathBuf::from("/mnt/myseconddisk"),
        ],
    };

    // Settings serializes to plain JSON-compatible data, so this cannot fail.
    let mut doc = serde_json::to_string_pretty(&sample).unwrap_or_default();
    doc.push('\n');
    doc
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
