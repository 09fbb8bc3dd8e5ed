//! Command dispatch: builds the service container and runs one subcommand.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{EditOp, EditorSession};
use crate::cli::args::{Cli, Commands, ConfigCommands, TreeArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::OutlineConvert;
use crate::infrastructure::{InfraError, ServiceContainer};

/// File argument that selects stdin.
const STDIN_MARKER: &str = "-";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given (try 'tagtree --help')".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;
    let settings = Settings::load(Some(&project_dir))?;
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Show { tree } => _show(&container, tree),
        Commands::Export { tree, output } => _export(&container, tree, output.as_deref()),
        Commands::Config { command } => _config(&container, command, &project_dir),
        Commands::Completion { .. } => Ok(()),
    }
}

fn resolve_project_dir(project_dir: Option<&Path>) -> CliResult<PathBuf> {
    match project_dir {
        Some(dir) if !dir.is_dir() => Err(CliError::InvalidArgs(format!(
            "project directory does not exist: {}",
            dir.display()
        ))),
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir()
            .map_err(|e| CliError::from(InfraError::io("current directory", e))),
    }
}

/// Load the tree named by `args` and apply its edits in order.
#[instrument(skip(container))]
fn open_session(container: &ServiceContainer, args: &TreeArgs) -> CliResult<EditorSession> {
    open_session_from(container, args, &mut io::stdin())
}

/// Like [`open_session`], reading a `-` file argument from `stdin`.
fn open_session_from(
    container: &ServiceContainer,
    args: &TreeArgs,
    stdin: &mut dyn Read,
) -> CliResult<EditorSession> {
    let service = &container.tree_service;
    let mut session = match args.file.as_deref() {
        Some(path) if path == Path::new(STDIN_MARKER) => {
            let mut content = String::new();
            stdin
                .read_to_string(&mut content)
                .map_err(|e| InfraError::io("read tree from stdin", e))?;
            let raw = service.parse(&content, "<stdin>")?;
            EditorSession::from_raw(&raw, container.settings.new_child.clone())
        }
        other => service.open_session(other)?,
    };

    let skipped = apply_edits(&mut session, &args.edits)?;
    debug!("{} of {} edits had no effect", skipped, args.edits.len());
    Ok(session)
}

/// Apply `edits` left to right, warning about each one that changed nothing.
///
/// Returns the number of edits without effect.
fn apply_edits(session: &mut EditorSession, edits: &[EditOp]) -> CliResult<usize> {
    let mut skipped = 0;
    for op in edits {
        let changed = session.apply(op)?;
        debug!("applied {}: changed={}", op, changed);
        if !changed {
            output::warning(&format!("edit had no effect: {}", op));
            skipped += 1;
        }
    }
    Ok(skipped)
}

#[instrument(skip(container))]
fn _show(container: &ServiceContainer, args: &TreeArgs) -> CliResult<()> {
    let session = open_session(container, args)?;
    if let Some(root) = session.root() {
        output::info(&root.to_outline());
    }
    Ok(())
}

#[instrument(skip(container))]
fn _export(container: &ServiceContainer, args: &TreeArgs, target: Option<&Path>) -> CliResult<()> {
    let session = open_session(container, args)?;
    match target {
        Some(path) => {
            container.tree_service.write_export(&session, path)?;
            output::action("Exported", &path.display());
        }
        None => output::info(&container.tree_service.export_text(&session)?),
    }
    Ok(())
}

#[instrument(skip(container))]
fn _config(
    container: &ServiceContainer,
    command: &ConfigCommands,
    project_dir: &Path,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            output::header("Config files (lowest to highest precedence):");
            match global_config_path() {
                Some(path) => output::detail(&format!("global: {}", path.display())),
                None => output::detail("global: <no config directory>"),
            }
            output::detail(&format!(
                "local:  {}",
                local_config_path(project_dir).display()
            ));
            output::detail("env:    TAGTREE_*");
        }
        ConfigCommands::Init { global, force } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(project_dir)
            };

            if container.fs.exists(&path) && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .map_err(|e| InfraError::io(format!("create {}", path.display()), e))?;
            container
                .fs
                .write(&path, &Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
        }
    }
    Ok(())
}
