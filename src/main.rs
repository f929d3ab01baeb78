use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

use version_bumper::commands::{self, Report};
use version_bumper::config::{self, Config};
use version_bumper::logging::{self, LogOptions};
use version_bumper::ui::{self, OutputFormat};
use version_bumper::VersionBumperError;

const LONG_HELP: &str = "\
Reads the version of a Python project from pyproject.toml (project.version and,
when present, tool.poetry.version), changes it, and writes it back without
disturbing the rest of the file.

Versions follow the PyPA version specifiers: [N!]N[.N[.N]][{a|b|rc}N][.postN][.devN][+local]

Parts: epoch, major, minor, patch, a, b, rc, post, dev, local

Examples:
  version-bumper get                  # project.version: 1.2.2
  version-bumper bump patch           # 1.2.3
  version-bumper bump rc              # 1.2.3rc1
  version-bumper bump dev             # 1.2.3rc1.dev1
  version-bumper set local foo0100    # 1.2.3rc1.dev1+foo0100
  version-bumper bump local           # 1.2.3rc1.dev1+foo0101
  version-bumper release              # 1.2.3
  version-bumper set major 2 --clear-right

Settings are read from --config FILE, ./version_bumper.toml or the user
configuration directory. --save-config writes the effective settings back to
that file and --save-config-as FILE writes them elsewhere.
";

#[derive(clap::Parser)]
#[command(
    name = "version-bumper",
    version,
    about = "Bump a Python project's version by parts",
    long_about = LONG_HELP
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path (.toml or .json)")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Path to the pyproject.toml file")]
    pyproject: Option<PathBuf>,

    #[arg(long, global = true, conflicts_with = "text", help = "Output results as JSON")]
    json: bool,

    #[arg(long, global = true, help = "Output bare values, one per line")]
    text: bool,

    #[arg(long, global = true, value_name = "LEVEL", help = "Log level (error, warn, info, debug, trace)")]
    loglevel: Option<String>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    debug: bool,

    #[arg(short, long, global = true, help = "Only log errors")]
    quiet: bool,

    #[arg(long, global = true, value_name = "FILE", help = "Also append log messages to FILE")]
    logfile: Option<PathBuf>,

    #[arg(long, help = "Save the effective settings back to the configuration file in use")]
    save_config: bool,

    #[arg(long, value_name = "FILE", help = "Save the effective settings to FILE")]
    save_config_as: Option<PathBuf>,

    #[arg(long, help = "Show the long help text and exit")]
    longhelp: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the version stored in pyproject.toml
    Get {
        #[arg(long, help = "Show project.version (default)")]
        project: bool,

        #[arg(long, help = "Show tool.poetry.version")]
        poetry: bool,
    },
    /// Replace the whole version
    Version {
        value: String,

        #[arg(short, long, help = "Do not print the new version")]
        silent: bool,
    },
    /// Increment one part of the version and clear the parts to its right
    Bump {
        #[arg(help = "epoch, major, minor, patch, a, b, rc, post, dev or local")]
        part: String,
    },
    /// Remove the pre, post, dev and local parts
    Release,
    /// Set one part of the version
    Set {
        #[arg(help = "epoch, major, minor, patch, a, b, rc, post, dev or local")]
        part: String,

        #[arg(allow_hyphen_values = true)]
        value: String,

        #[arg(long, help = "Clear every part to the right of PART")]
        clear_right: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::display_error(&format!("{err:#}"));
            let code = err
                .downcast_ref::<VersionBumperError>()
                .map_or(1, VersionBumperError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run(args: Args) -> Result<()> {
    if args.longhelp {
        println!("{LONG_HELP}");
        return Ok(());
    }

    let config_path = config::find_config(args.config.as_deref());
    let mut config = match &config_path {
        Some(path) => config::read_config(path).context("Error loading config")?,
        None => Config::default(),
    };

    // Command line settings win over the config file
    if let Some(path) = args.logfile {
        config.logging.file = Some(path);
    }
    let log_options = LogOptions {
        quiet: args.quiet,
        debug: args.debug,
        level: args.loglevel.clone(),
    };
    logging::init(
        &log_options.resolve(&config.logging.level),
        config.logging.file.as_deref(),
    )?;

    if let Some(path) = args.pyproject {
        config.pyproject.path = path;
    }
    if args.json {
        config.output.format = OutputFormat::Json;
    } else if args.text {
        config.output.format = OutputFormat::Text;
    }
    if let Some(level) = args.loglevel {
        config.logging.level = level;
    }

    let save_path = args.save_config_as.or_else(|| {
        args.save_config
            .then(|| config_path.unwrap_or_else(|| PathBuf::from(config::LOCAL_CONFIG_FILE)))
    });
    if let Some(path) = &save_path {
        config::save_config(path, &config)
            .with_context(|| format!("Failed to save config to {}", path.display()))?;
        ui::display_success(&format!("Saved settings to {}", path.display()));
    }

    let Some(command) = args.command else {
        if save_path.is_none() {
            Args::command().print_help()?;
        }
        return Ok(());
    };

    let path = config.pyproject.path.as_path();
    let report: Option<Report> = match command {
        Command::Get { project, poetry } => Some(commands::get_command(path, project, poetry)?),
        Command::Version { value, silent } => {
            let report = commands::version_command(path, &value)?;
            (!silent).then_some(report)
        }
        Command::Bump { part } => Some(commands::bump_command(path, &part)?),
        Command::Release => Some(commands::release_command(path)?),
        Command::Set {
            part,
            value,
            clear_right,
        } => Some(commands::set_command(path, &part, &value, clear_right)?),
    };

    if let Some(report) = report {
        ui::display_report(&report, config.output.format)?;
    }
    Ok(())
}
