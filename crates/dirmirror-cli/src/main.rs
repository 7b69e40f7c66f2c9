//! dirmirror - one-way, timestamp-driven directory mirroring
//!
//! Mirrors the locations of a backup profile onto their destinations: new
//! files are added, newer files are updated and everything without a source
//! counterpart is removed from the destination.

mod display;
mod interactive;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use dirmirror_config::{ProfileCatalog, ProfileLoader, Settings, SettingsLoader};
use dirmirror_sync::run_mirror;
use display::ConsoleReporter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};

/// dirmirror - one-way, timestamp-driven directory mirroring
#[derive(Parser, Debug)]
#[command(
    name = "dirmirror",
    version = env!("CARGO_PKG_VERSION"),
    about = "One-way, timestamp-driven directory mirroring",
    long_about = "dirmirror makes backup destinations match their sources.\n\
                  Missing files are copied, newer files overwrite older copies and\n\
                  entries that no longer exist at the source are removed.\n\
                  Run without a command to pick a profile interactively."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Quiet mode - only the run outcome is printed
    #[arg(short, long)]
    quiet: bool,

    /// Verbose mode - detailed output
    #[arg(short, long)]
    verbose: bool,

    /// Settings file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Mirror the locations of a backup profile
    Run {
        /// Profile name (file stem in the profile directory) or path to a profile file
        profile: String,
        /// Dry run - show what would change without changing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// List the available backup profiles
    List,
    /// Write an example backup profile
    Init {
        /// File to create (.yaml, .yml, .toml or .json)
        file: PathBuf,
    },
    /// Show the effective settings
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(error) => {
            display::present_failure(&error);
            return ExitCode::FAILURE;
        }
    };

    if !settings.logging.colored_output {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    if let Err(error) = init_logging(&cli, &settings) {
        display::present_failure(&error);
        return ExitCode::FAILURE;
    }

    info!("dirmirror v{} starting", env!("CARGO_PKG_VERSION"));

    match execute(cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            display::present_failure(&error);
            ExitCode::FAILURE
        }
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let settings = match path {
        Some(path) => SettingsLoader::load_from_file(path),
        None => SettingsLoader::load_default(),
    };
    Ok(settings.map_err(dirmirror_types::Error::from)?)
}

fn init_logging(cli: &Cli, settings: &Settings) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = log_level(cli, settings);
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    Ok(())
}

fn log_level<'a>(cli: &Cli, settings: &'a Settings) -> &'a str {
    if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        &settings.logging.level
    }
}

fn execute(cli: Cli, settings: &Settings) -> Result<()> {
    match cli.command {
        Some(Commands::Run { profile, dry_run }) => {
            let path = resolve_profile(settings, &profile)?;
            run_profile(&path, dry_run, cli.quiet)?;
        }
        Some(Commands::List) => list_command(settings)?,
        Some(Commands::Init { file }) => init_command(&file)?,
        Some(Commands::Config) => config_command(settings)?,
        None => interactive::run(settings, cli.quiet)?,
    }
    Ok(())
}

/// A path to an existing file is used as is, anything else is a profile name
fn resolve_profile(settings: &Settings, profile: &str) -> dirmirror_types::Result<PathBuf> {
    if Path::new(profile).is_file() {
        return Ok(PathBuf::from(profile));
    }
    let catalog = ProfileCatalog::scan(&settings.profiles.directory)?;
    Ok(catalog.find(profile)?)
}

/// Load, validate and mirror one profile
pub(crate) fn run_profile(path: &Path, dry_run: bool, quiet: bool) -> dirmirror_types::Result<bool> {
    let profile = ProfileLoader::load(path)?;
    debug!("Running profile:\n{}", profile);

    if dry_run {
        display::display_info("Dry run: changes are listed but not applied.");
    }

    let mut reporter = ConsoleReporter::new(quiet);
    run_mirror(&profile.locations, dry_run, &mut reporter)
}

fn list_command(settings: &Settings) -> dirmirror_types::Result<()> {
    let catalog = ProfileCatalog::scan(&settings.profiles.directory)?;
    println!(
        "{} {}",
        style("Backup profiles in").bold(),
        style(catalog.directory().display()).cyan()
    );
    for line in display::catalog_lines(&catalog) {
        println!("{}", line);
    }
    Ok(())
}

fn init_command(file: &Path) -> dirmirror_types::Result<()> {
    ProfileLoader::save_template(file)?;
    display::display_success(&format!("Wrote example profile to '{}'", file.display()));
    Ok(())
}

fn config_command(settings: &Settings) -> Result<()> {
    match SettingsLoader::settings_file_exists() {
        Some(path) => display::display_info(&format!("Settings file: {}", path.display())),
        None => display::display_info("No settings file found, showing defaults"),
    }
    print!("{}", serde_yaml::to_string(settings)?);
    Ok(())
}
