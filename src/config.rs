//! Generator configuration
//!
//! Defaults reproduce the canonical fixture (`ragged_data.pkl`, pickle
//! protocol 3). A JSON file can override the output path or protocol.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::FixtureError;
use crate::fixture::FIXTURE_FILE_NAME;

/// Pickle protocol version used when writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PickleProtocol {
    /// Readable by Python 2 as well
    V2,
    /// Python 3 default for plain containers
    #[default]
    V3,
}

impl PickleProtocol {
    pub fn ser_options(self) -> serde_pickle::SerOptions {
        match self {
            PickleProtocol::V2 => serde_pickle::SerOptions::new().proto_v2(),
            PickleProtocol::V3 => serde_pickle::SerOptions::new(),
        }
    }
}

impl TryFrom<u8> for PickleProtocol {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(PickleProtocol::V2),
            3 => Ok(PickleProtocol::V3),
            other => Err(format!("unsupported pickle protocol {other} (expected 2 or 3)")),
        }
    }
}

impl From<PickleProtocol> for u8 {
    fn from(protocol: PickleProtocol) -> Self {
        match protocol {
            PickleProtocol::V2 => 2,
            PickleProtocol::V3 => 3,
        }
    }
}

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Where the fixture is written, relative to the working directory unless absolute
    pub output_path: PathBuf,
    pub protocol: PickleProtocol,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(FIXTURE_FILE_NAME),
            protocol: PickleProtocol::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_protocol(mut self, protocol: PickleProtocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Load configuration from a JSON file
    ///
    /// A missing file falls back to defaults. A file that exists but cannot
    /// be read or parsed is an error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config = serde_json::from_str(&contents).map_err(|err| FixtureError::Config {
                    details: format!("{}: {}", path.display(), err),
                })?;
                log::info!("[Config] Loaded configuration from {:?}", path);
                Ok(config)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::warn!(
                    "[Config] Config file {:?} not found. Using defaults.",
                    path
                );
                Ok(Self::default())
            }
            Err(err) => Err(FixtureError::io(path, &err)),
        }
    }

    /// File name component of the output path, used in the confirmation line.
    pub fn output_file_name(&self) -> String {
        self.output_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.output_path.display().to_string())
    }
}
