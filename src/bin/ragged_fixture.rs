use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ragged_fixture::verify::ShapeDiff;
use ragged_fixture::{
    confirmation, load_fixture, logging, verify_fixture, FixtureGenerator, GeneratorConfig,
    PickleProtocol, FIXTURE_FILE_NAME,
};

#[derive(Parser, Debug)]
#[command(
    name = "ragged_fixture",
    about = "Writes the ragged nested pickle fixture (ragged_data.pkl)"
)]
struct Cli {
    /// Defaults to `generate` with no options
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the fixture file (default when no subcommand is given)
    Generate {
        /// JSON config file providing output_path and protocol
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        /// Pickle protocol version (2 or 3)
        #[arg(long, value_parser = parse_protocol)]
        protocol: Option<PickleProtocol>,
    },
    /// Load a fixture file and compare it with the expected structure
    Verify {
        #[arg(long, default_value = FIXTURE_FILE_NAME)]
        input: PathBuf,
    },
    /// Print a fixture file as JSON
    Dump {
        #[arg(long, default_value = FIXTURE_FILE_NAME)]
        input: PathBuf,
    },
}

fn parse_protocol(raw: &str) -> std::result::Result<PickleProtocol, String> {
    let version: u8 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a protocol number"))?;
    PickleProtocol::try_from(version)
}

fn main() -> ExitCode {
    logging::init();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Generate {
        config: None,
        output: None,
        protocol: None,
    }) {
        Commands::Generate {
            config,
            output,
            protocol,
        } => run_generate(config, output, protocol),
        Commands::Verify { input } => run_verify(input),
        Commands::Dump { input } => run_dump(input),
    }
}

fn run_generate(
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    protocol: Option<PickleProtocol>,
) -> Result<ExitCode> {
    let mut config = match config_path {
        Some(path) => GeneratorConfig::load_from_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    if let Some(output) = output {
        config = config.with_output(output);
    }
    if let Some(protocol) = protocol {
        config = config.with_protocol(protocol);
    }

    let generator = FixtureGenerator::new(config);
    let report = generator
        .generate()
        .with_context(|| format!("writing {}", generator.config().output_path.display()))?;
    tracing::debug!(bytes = report.bytes_written, "fixture written");

    println!("{}", confirmation(&generator.config().output_file_name()));
    Ok(ExitCode::SUCCESS)
}

fn run_verify(input: PathBuf) -> Result<ExitCode> {
    let value = load_fixture(&input).with_context(|| format!("loading {}", input.display()))?;
    match verify_fixture(&value) {
        Ok(()) => {
            println!("{} matches the ragged fixture", input.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(diff) => {
            emit_diff(&diff)?;
            Ok(ExitCode::from(2))
        }
    }
}

fn run_dump(input: PathBuf) -> Result<ExitCode> {
    let value = load_fixture(&input).with_context(|| format!("loading {}", input.display()))?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(ExitCode::SUCCESS)
}

fn emit_diff(diff: &ShapeDiff) -> Result<()> {
    let json = serde_json::to_string_pretty(&diff.to_json())?;
    eprintln!("{json}");
    Ok(())
}
