// Ragged Fixture - pickle fixture generator
// Writes a fixed, deliberately ragged nested value for deserializer tests

// Module declarations
pub mod config;
pub mod error;
pub mod fixture;
pub mod generator;
pub mod logging;
pub mod value;
pub mod verify;

// Re-exports for convenience
pub use config::{GeneratorConfig, PickleProtocol};
pub use error::{ErrorCode, FixtureError};
pub use fixture::{confirmation, ragged_data, FIXTURE_FILE_NAME};
pub use generator::{load_fixture, run, FixtureGenerator, GenerationReport};
pub use value::FixtureValue;
pub use verify::{verify_fixture, ShapeDiff};
