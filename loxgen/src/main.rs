//! Lox Source Generator Binary
//!
//! Run with: `loxgen [OPTIONS] <COMMAND>`

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use loxgen::{Config, ConstantsConfig, ConstantsGenerator, GeneratedArtifact, TestSuiteGenerator, TestsConfig};

#[derive(Parser)]
#[command(name = "loxgen")]
#[command(about = "Generates benchmark constants and fixture tests for the Lox interpreter")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (TOML)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Check that outputs are up to date without writing them
    #[arg(long, global = true)]
    check: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed every file of a directory as a string constant
    Consts {
        /// Directory to embed
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Generated file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File name to leave out (repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Generate one test per fixture, grouped by category
    Tests {
        /// Fixture root holding one directory per category
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Generated file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fixture extension
        #[arg(short, long)]
        extension: Option<String>,

        /// Prefix of the paths passed to the runner
        #[arg(short, long)]
        prefix: Option<String>,

        /// Runner function the tests call
        #[arg(long)]
        runner: Option<String>,
    },

    /// Run both generators
    All,

    /// Print the effective configuration (defaults merged with --config)
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    let mut config = load_config(&cli)?;

    let up_to_date = match cli.command {
        Commands::Config => {
            print!("{}", config.to_toml()?);
            return Ok(());
        }
        Commands::Consts {
            source,
            output,
            exclude,
        } => {
            if let Some(source) = source {
                config.constants.source_dir = source;
            }
            if let Some(output) = output {
                config.constants.output = output;
            }
            if !exclude.is_empty() {
                config.constants.exclude = exclude;
            }
            run_constants(&config.constants, cli.check)?
        }
        Commands::Tests {
            root,
            output,
            extension,
            prefix,
            runner,
        } => {
            if let Some(root) = root {
                config.tests.fixture_root = root;
            }
            if let Some(output) = output {
                config.tests.output = output;
            }
            if let Some(extension) = extension {
                config.tests.extension = extension;
            }
            if prefix.is_some() {
                config.tests.path_prefix = prefix;
            }
            if let Some(runner) = runner {
                config.tests.runner = runner;
            }
            run_tests(&config.tests, cli.check)?
        }
        Commands::All => {
            let constants = run_constants(&config.constants, cli.check)?;
            let tests = run_tests(&config.tests, cli.check)?;
            constants && tests
        }
    };

    if !up_to_date {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn run_constants(config: &ConstantsConfig, check: bool) -> Result<bool> {
    let generator = ConstantsGenerator::from_config(config);
    if check {
        let artifact = generator.build().with_context(|| {
            format!("Failed to generate constants from {}", config.source_dir.display())
        })?;
        return check_output(&artifact, &config.output);
    }

    generator.generate(&config.output).with_context(|| {
        format!(
            "Failed to generate {} from {}",
            config.output.display(),
            config.source_dir.display()
        )
    })?;
    Ok(true)
}

fn run_tests(config: &TestsConfig, check: bool) -> Result<bool> {
    let generator = TestSuiteGenerator::from_config(config);
    if check {
        let artifact = generator.build().with_context(|| {
            format!("Failed to generate tests from {}", config.fixture_root.display())
        })?;
        return check_output(&artifact, &config.output);
    }

    generator.generate(&config.output).with_context(|| {
        format!(
            "Failed to generate {} from {}",
            config.output.display(),
            config.fixture_root.display()
        )
    })?;
    Ok(true)
}

fn check_output(artifact: &GeneratedArtifact, output: &Path) -> Result<bool> {
    let current = artifact
        .is_current(output)
        .with_context(|| format!("Failed to read {}", output.display()))?;
    if current {
        info!("{} is up to date", output.display());
    } else {
        warn!("{} is out of date", output.display());
    }
    Ok(current)
}
