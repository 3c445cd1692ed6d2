//! User configuration options.

use std::fs::{create_dir_all, read_to_string, write};
use std::io;
use std::path::{Path, PathBuf};

use dirs::config_dir;
use log::{info, warn};
use nanoserde::{DeRon, SerRon};
use render_soft::PlaneConfig;

use crate::CLIOptions;

const LOG_TAG: &str = "ViewConfig";
const BASE_DIR: &str = "flatplanes";
const CONFIG_FILE: &str = "planes.ron";

/// `<config_dir>/flatplanes/planes.ron`
pub fn default_path() -> io::Result<PathBuf> {
    let mut dir = config_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "couldn't find the user config dir")
    })?;
    dir.push(BASE_DIR);
    dir.push(CONFIG_FILE);
    Ok(dir)
}

#[derive(Debug, Clone, PartialEq, DeRon, SerRon)]
pub struct ViewConfig {
    pub width: u32,
    pub height: u32,
    pub truecolour: bool,
    pub planes: PlaneConfig,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 400,
            truecolour: false,
            planes: PlaneConfig::default(),
        }
    }
}

impl ViewConfig {
    /// Read the config at `path`. A missing, empty or unreadable file is
    /// replaced with the defaults.
    pub fn load(path: &Path) -> io::Result<Self> {
        let text = if path.exists() {
            read_to_string(path)?
        } else {
            String::new()
        };
        if text.trim().is_empty() {
            return Self::create_default(path);
        }
        match ViewConfig::deserialize_ron(&text) {
            Ok(config) => {
                info!(target: LOG_TAG, "Loaded config from {path:?}");
                Ok(config)
            }
            Err(e) => {
                warn!(target: LOG_TAG, "Could not deserialise {path:?} ({e:?}), recreating config");
                Self::create_default(path)
            }
        }
    }

    fn create_default(path: &Path) -> io::Result<Self> {
        let config = ViewConfig::default();
        config.write(path)?;
        info!(target: LOG_TAG, "Created default config at {path:?}");
        Ok(config)
    }

    pub fn write(&self, path: &Path) -> io::Result<()> {
        if let Some(dir) = path.parent() {
            create_dir_all(dir)?;
        }
        write(path, self.serialize_ron())
    }

    /// Sync the CLI options and the config with each other. Options given on
    /// the command line win and are saved back.
    pub fn sync_cli(&mut self, cli: &mut CLIOptions) {
        if cli.width != 0 && cli.width != self.width {
            self.width = cli.width;
        } else {
            cli.width = self.width;
        }

        if cli.height != 0 && cli.height != self.height {
            self.height = cli.height;
        } else {
            cli.height = self.height;
        }

        if let Some(t) = cli.truecolour {
            self.truecolour = t;
        } else {
            cli.truecolour = Some(self.truecolour);
        }
    }
}
