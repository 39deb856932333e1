//! Fixture writer and loader.
//!
//! The output file is opened inside [`FixtureGenerator::generate`] and
//! dropped when that call returns, so the handle is released on success
//! and on every error path alike.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::{GeneratorConfig, PickleProtocol};
use crate::error::{log_fixture_error, FixtureError};
use crate::fixture::ragged_data;
use crate::value::FixtureValue;

/// Summary of a completed generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub path: PathBuf,
    pub bytes_written: u64,
    pub protocol: PickleProtocol,
}

/// Writes the ragged fixture according to a [`GeneratorConfig`].
pub struct FixtureGenerator {
    config: GeneratorConfig,
}

impl FixtureGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build the fixture value and write it to the configured path.
    pub fn generate(&self) -> Result<GenerationReport, FixtureError> {
        self.write_value(&ragged_data())
    }

    /// Serialize `value` to the configured path, creating or truncating it.
    pub fn write_value(&self, value: &FixtureValue) -> Result<GenerationReport, FixtureError> {
        let path = &self.config.output_path;
        let bytes = serde_pickle::value_to_vec(&value.to_pickle(), self.config.protocol.ser_options())
            .map_err(|err| FixtureError::from_pickle_write(path, err))?;
        debug!(
            "[Generator] Encoded {} bytes with protocol {}",
            bytes.len(),
            u8::from(self.config.protocol)
        );

        write_file(path, &bytes).inspect_err(|err| log_fixture_error(err, "write_value"))?;

        info!("[Generator] Wrote fixture to {:?}", path);
        Ok(GenerationReport {
            path: path.clone(),
            bytes_written: bytes.len() as u64,
            protocol: self.config.protocol,
        })
    }
}

impl Default for FixtureGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), FixtureError> {
    let file = File::create(path).map_err(|err| FixtureError::io(path, &err))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .map_err(|err| FixtureError::io(path, &err))?;
    // flush explicitly; BufWriter's drop swallows errors
    writer.flush().map_err(|err| FixtureError::io(path, &err))?;
    Ok(())
}

/// Write `ragged_data.pkl` into the current working directory.
///
/// Entry point for callers that want the canonical fixture with no
/// configuration. Returns the path written.
pub fn run() -> Result<PathBuf, FixtureError> {
    FixtureGenerator::default()
        .generate()
        .map(|report| report.path)
}

/// Read a pickle file and convert it into a [`FixtureValue`].
pub fn load_fixture<P: AsRef<Path>>(path: P) -> Result<FixtureValue, FixtureError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| FixtureError::io(path, &err))?;
    let value = serde_pickle::value_from_reader(BufReader::new(file), serde_pickle::DeOptions::new())
        .map_err(|err| FixtureError::from_pickle_read(path, err))?;
    FixtureValue::from_pickle(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::error::FixtureErrorCodes;
    use std::fs;
    use std::io;
    use tempfile::TempDir;

    fn generator_in(dir: &TempDir) -> FixtureGenerator {
        FixtureGenerator::new(GeneratorConfig::default().with_output(dir.path().join("ragged_data.pkl")))
    }

    #[test]
    fn generate_round_trips() {
        let dir = TempDir::new().unwrap();
        let report = generator_in(&dir).generate().unwrap();
        assert!(report.bytes_written > 0);
        assert_eq!(fs::metadata(&report.path).unwrap().len(), report.bytes_written);

        let loaded = load_fixture(&report.path).unwrap();
        assert_eq!(loaded, ragged_data());
    }

    #[test]
    fn generation_is_byte_for_byte_repeatable() {
        let dir = TempDir::new().unwrap();
        let generator = generator_in(&dir);
        let first = fs::read(generator.generate().unwrap().path).unwrap();
        let second = fs::read(generator.generate().unwrap().path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn existing_file_is_overwritten() {
        let dir = TempDir::new().unwrap();
        let generator = generator_in(&dir);
        fs::write(&generator.config().output_path, vec![0xAB; 4096]).unwrap();
        let report = generator.generate().unwrap();
        assert_eq!(fs::metadata(&report.path).unwrap().len(), report.bytes_written);
        assert_eq!(load_fixture(&report.path).unwrap(), ragged_data());
    }

    #[test]
    fn protocol_2_output_is_readable() {
        let dir = TempDir::new().unwrap();
        let generator = FixtureGenerator::new(
            GeneratorConfig::default()
                .with_output(dir.path().join("v2.pkl"))
                .with_protocol(PickleProtocol::V2),
        );
        let report = generator.generate().unwrap();
        let bytes = fs::read(&report.path).unwrap();
        // PROTO opcode followed by the version byte
        assert_eq!(&bytes[..2], &[0x80, 2]);
        assert_eq!(load_fixture(&report.path).unwrap(), ragged_data());
    }

    #[test]
    fn default_protocol_header() {
        let dir = TempDir::new().unwrap();
        let report = generator_in(&dir).generate().unwrap();
        let bytes = fs::read(&report.path).unwrap();
        assert_eq!(&bytes[..2], &[0x80, 3]);
        assert_eq!(bytes.last(), Some(&b'.'));
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let generator = FixtureGenerator::new(
            GeneratorConfig::default().with_output(dir.path().join("missing").join("ragged_data.pkl")),
        );
        let err = generator.generate().unwrap_err();
        assert_eq!(err.code(), FixtureErrorCodes::IO_FAILED);
        match err {
            FixtureError::Io { kind, .. } => assert_eq!(kind, io::ErrorKind::NotFound),
            other => panic!("Expected Io, got {other:?}"),
        }
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn load_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.pkl");
        fs::write(&path, b"not a pickle").unwrap();
        assert!(load_fixture(&path).is_err());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_fixture(dir.path().join("absent.pkl")).unwrap_err();
        assert!(matches!(err, FixtureError::Io { kind: io::ErrorKind::NotFound, .. }));
    }
}
