//! INI-style configuration file.
//!
//! ```ini
//! ; comments start with a semicolon
//! [resource]
//! path=res
//! [game]
//! default_map=test_infinite_map.json
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Error, Result};

const RESOURCE_SECTION: &str = "resource";
const PATH_KEY: &str = "path";
const GAME_SECTION: &str = "game";
const DEFAULT_MAP_KEY: &str = "default_map";

/// Resource root used when the config does not name one.
pub const DEFAULT_RESOURCE_ROOT: &str = "res";

/// Reads `reader` line by line and calls `handler(section, key, value)` for
/// every property, in file order.
pub fn parse_config<R, F>(reader: R, mut handler: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(&str, &str, &str),
{
    let mut section = String::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            Error::invalid_argument(format!("Error on line {}: {e}", index + 1))
        })?;
        let line = line.trim_end_matches('\r');

        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[') {
            section = name.strip_suffix(']').unwrap_or(name).to_owned();
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(Error::invalid_argument(format!(
                "Error on line {}: invalid property",
                index + 1
            )));
        };
        handler(&section, key, value);
    }
    Ok(())
}

/// Parsed configuration, section → key → value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigArgs {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl ConfigArgs {
    /// Value of `key` in `section`, if set.
    pub fn get_value(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|values| values.get(key))
            .map(String::as_str)
    }

    /// Inserts or overwrites a value.
    pub fn set_value(&mut self, section: &str, key: &str, value: &str) {
        self.sections
            .entry(section.to_owned())
            .or_default()
            .insert(key.to_owned(), value.to_owned());
    }

    /// `[resource] path`, or [`DEFAULT_RESOURCE_ROOT`].
    pub fn resource_root(&self) -> PathBuf {
        PathBuf::from(
            self.get_value(RESOURCE_SECTION, PATH_KEY)
                .unwrap_or(DEFAULT_RESOURCE_ROOT),
        )
    }

    /// `[game] default_map`, relative to the resource root.
    pub fn default_map(&self) -> Option<&str> {
        self.get_value(GAME_SECTION, DEFAULT_MAP_KEY)
    }

    /// Loads the config at `path`. A missing file gives the default config.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => return Err(Error::io(path, source)),
        };
        parse_config_args(BufReader::new(file))
            .map_err(|e| e.with_prefix("Invalid config file: "))
    }
}

/// Parses a whole config file into a [`ConfigArgs`].
pub fn parse_config_args(reader: impl BufRead) -> Result<ConfigArgs> {
    let mut args = ConfigArgs::default();
    parse_config(reader, |section, key, value| args.set_value(section, key, value))?;
    Ok(args)
}
