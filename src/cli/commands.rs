//! Command dispatch

use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::CatalogService;
use crate::cli::args::{Cli, Commands};
use crate::cli::menu::{write_course, Menu};
use crate::cli::{output, CliResult};
use crate::config::{global_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Resolve settings: config layers first, then command line flags.
pub fn resolve_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load()?;
    if let Some(delimiter) = cli.delimiter {
        settings.delimiter = delimiter;
    }
    if cli.no_color {
        settings.color = false;
    }
    Ok(settings)
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = resolve_settings(cli)?;
    if !settings.color {
        colored::control::set_override(false);
    }
    let container = ServiceContainer::new(settings);

    match &cli.command {
        None => _menu(&container, None),
        Some(Commands::Menu { file }) => _menu(&container, file.as_deref()),
        Some(Commands::List { file }) => _list(&container, file),
        Some(Commands::Show { file, course }) => _show(&container, file, course),
        Some(Commands::Tree { file }) => _tree(&container, file),
        Some(Commands::Config) => _config(&container),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn io_err(e: io::Error) -> InfraError {
    InfraError::io("write command output", e)
}

/// Load a catalog for a one-shot command. Warnings go to `err`; an
/// unreadable source is an error.
pub fn load_once(
    container: &ServiceContainer,
    file: &Path,
    err: &mut impl Write,
) -> CliResult<CatalogService> {
    let mut service = container.catalog_service();
    let report = service.load(file)?;
    for warning in &report.warnings {
        output::warning(err, warning).map_err(io_err)?;
    }
    debug!("load_once: {} courses from {}", report.distinct, report.path.display());
    Ok(service)
}

#[instrument(skip(container))]
fn _menu(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let mut service = container.catalog_service();
    let stdin = io::stdin();
    let mut menu = Menu::new(&mut service, stdin.lock(), io::stdout().lock());

    if let Some(path) = file.or(container.settings.default_file.as_deref()) {
        menu.preload(path)?;
    }
    menu.run()
}

fn _list(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    run_list(container, file, &mut io::stdout().lock(), &mut io::stderr().lock())
}

fn _show(container: &ServiceContainer, file: &Path, course: &str) -> CliResult<()> {
    run_show(
        container,
        file,
        course,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
}

fn _tree(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    run_tree(container, file, &mut io::stdout().lock(), &mut io::stderr().lock())
}

fn _config(container: &ServiceContainer) -> CliResult<()> {
    run_config(container, &mut io::stdout().lock())
}

/// Print every course in ascending number order.
#[instrument(skip(container, out, err))]
pub fn run_list(
    container: &ServiceContainer,
    file: &Path,
    out: &mut impl Write,
    err: &mut impl Write,
) -> CliResult<()> {
    let service = load_once(container, file, err)?;
    for course in service.list()? {
        output::info(out, course).map_err(io_err)?;
    }
    Ok(())
}

/// Print one course and its prerequisites.
#[instrument(skip(container, out, err))]
pub fn run_show(
    container: &ServiceContainer,
    file: &Path,
    course: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> CliResult<()> {
    let service = load_once(container, file, err)?;
    let found = service.show(course)?;
    write_course(out, found).map_err(io_err)?;
    Ok(())
}

/// Print the node layout followed by size and depth.
#[instrument(skip(container, out, err))]
pub fn run_tree(
    container: &ServiceContainer,
    file: &Path,
    out: &mut impl Write,
    err: &mut impl Write,
) -> CliResult<()> {
    let service = load_once(container, file, err)?;
    let tree = service.tree();
    write!(out, "{}", tree.to_display_tree()).map_err(io_err)?;
    output::action(out, "Courses", &tree.len()).map_err(io_err)?;
    output::action(out, "Depth", &tree.depth()).map_err(io_err)?;
    Ok(())
}

/// Print the config file location and the effective settings.
pub fn run_config(container: &ServiceContainer, out: &mut impl Write) -> CliResult<()> {
    let path = global_config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unavailable>".to_string());
    output::action(out, "Config file", &path).map_err(io_err)?;
    output::info(out, &container.settings.to_toml()?).map_err(io_err)?;
    Ok(())
}
