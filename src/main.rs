//! Stackgen's main application entry point.
//! Loads the project configuration, applies command-line overrides and runs
//! the modular generator.

use std::rc::Rc;

use stackgen::{
    cli::{get_args, Args},
    command::{CommandFormatter, Formatter},
    config::load_config,
    error::{default_error_handler, Result},
    generator::{Generator, GeneratorOptions, ModularGenerator},
    logger::init_logger,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the configuration and applies overrides
/// 2. Builds the generator with the standard plugin set
/// 3. Generates the project and reports the outcome
fn run(args: Args) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let mut config = load_config(&args.config, &cwd)?;

    if let Some(output) = args.output {
        config.project_dir = if output.is_absolute() { output } else { cwd.join(output) };
    }
    if let Some(conflict) = args.conflict {
        config.directory_conflict = conflict.into();
    }
    if args.no_install {
        config.install = false;
    }
    if args.no_git {
        config.git = false;
    }

    let mut options =
        GeneratorOptions { tie_break: args.tie_break.into(), ..GeneratorOptions::default() };
    if let Some(templates) = args.templates {
        options.template_root = templates;
    }
    if args.format {
        options.formatter = Some(Rc::new(CommandFormatter::prettier()) as Rc<dyn Formatter>);
    }

    let generator = ModularGenerator::new(options)?;
    let result = generator.generate(config);

    for warning in &result.warnings {
        log::warn!("{warning}");
    }
    match result.error {
        Some(err) => Err(err),
        None => {
            println!(
                "Project generated in {} ({} files, {:.2?}).",
                result.project_dir.display(),
                result.files.len(),
                result.elapsed
            );
            Ok(())
        }
    }
}
