//! Command-line interface implementation for stackgen.
//! Provides argument parsing and help text formatting using clap.

use std::path::PathBuf;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};

use crate::config::DirectoryConflict;
use crate::plugin::TieBreak;

/// Policy for a non-empty project directory, as accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictArg {
    Error,
    Merge,
    Overwrite,
    Increment,
}

impl From<ConflictArg> for DirectoryConflict {
    fn from(arg: ConflictArg) -> Self {
        match arg {
            ConflictArg::Error => DirectoryConflict::Error,
            ConflictArg::Merge => DirectoryConflict::Merge,
            ConflictArg::Overwrite => DirectoryConflict::Overwrite,
            ConflictArg::Increment => DirectoryConflict::Increment,
        }
    }
}

/// Ordering of plugins that share a priority.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreakArg {
    Registration,
    Name,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Registration => TieBreak::RegistrationOrder,
            TieBreakArg::Name => TieBreak::Name,
        }
    }
}

/// Command-line arguments structure for stackgen.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Stackgen: full-stack TypeScript project scaffolding",
    long_about = None
)]
pub struct Args {
    /// Project configuration file, or a directory containing stackgen.json/.yml/.yaml
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Directory where the project is generated, overriding the configuration
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Root of the template tree
    #[arg(short, long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// What to do when the project directory exists and is not empty
    #[arg(short, long, value_enum)]
    pub conflict: Option<ConflictArg>,

    /// Ordering of plugins with equal priority
    #[arg(long, value_enum, default_value_t = TieBreakArg::Registration)]
    pub tie_break: TieBreakArg,

    /// Run prettier over the generated project
    #[arg(long)]
    pub format: bool,

    /// Skip dependency installation
    #[arg(long)]
    pub no_install: bool,

    /// Skip git repository initialization
    #[arg(long)]
    pub no_git: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
