//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use termtree::Tree;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, project_config_path, Settings};
use crate::domain::TaxonomyNode;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Build { input, output }) => {
            _build(&container(cli)?, input.as_deref(), output.as_deref())
        }
        Some(Commands::Publish) => _publish(&container(cli)?),
        Some(Commands::Tree { input }) => _tree(&container(cli)?, input.as_deref()),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Err(CliError::Usage(
            "no command given, see `atlas --help`".to_string(),
        )),
    }
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("determine current directory", e).into()),
    }
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    let project_dir = project_dir(cli)?;
    if !project_dir.is_dir() {
        return Err(CliError::InvalidArgs(format!(
            "project directory does not exist: {}",
            project_dir.display()
        )));
    }
    let settings = Settings::load(Some(&project_dir))?;
    debug!("settings: {:?}", settings);
    Ok(ServiceContainer::new(settings, &project_dir))
}

#[instrument(skip(container))]
fn _build(container: &ServiceContainer, input: Option<&Path>, output: Option<&Path>) -> CliResult<()> {
    let report = container
        .atlas_service()
        .build(&container.project_dir, input, output)?;
    output::success(&format!(
        "Laid out {} nodes across {} branches",
        report.node_count, report.branch_count
    ));
    for file in &report.files {
        output::detail(&file.display());
    }
    Ok(())
}

#[instrument(skip(container))]
fn _publish(container: &ServiceContainer) -> CliResult<()> {
    match container.publish_service().publish(&container.project_dir)? {
        Some(report) => output::success(&format!(
            "Published {} files to {}",
            report.files,
            report.target.display()
        )),
        None => output::warning(&format!(
            "no data directory at {}, nothing to publish",
            container
                .settings
                .data_path(&container.project_dir)
                .display()
        )),
    }
    Ok(())
}

#[instrument(skip(container))]
fn _tree(container: &ServiceContainer, input: Option<&Path>) -> CliResult<()> {
    let path = input
        .map(Path::to_path_buf)
        .unwrap_or_else(|| container.settings.master_path(&container.project_dir));
    let master = container.atlas_service().load_taxonomy(&path)?;
    output::info(&taxonomy_tree(&master));
    Ok(())
}

/// Render a taxonomy for the terminal; inner nodes show their leaf weight.
fn taxonomy_tree(node: &TaxonomyNode) -> Tree<String> {
    let label = if node.is_leaf() {
        node.name.clone()
    } else {
        format!("{} ({})", node.name, node.leaf_count())
    };
    Tree::new(label).with_leaves(node.children.iter().map(taxonomy_tree))
}

fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let project_dir = project_dir(cli)?;
            let settings = Settings::load(Some(&project_dir))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            let project_dir = project_dir(cli)?;
            output::header(&"Config files (lowest to highest precedence)");
            match global_config_path() {
                Some(path) => output::detail(&describe_path(&path)),
                None => output::detail(&"global: <no config directory>"),
            }
            output::detail(&describe_path(&project_config_path(&project_dir)));
        }
    }
    Ok(())
}

fn describe_path(path: &Path) -> String {
    let state = if path.exists() { "found" } else { "missing" };
    format!("{} ({})", path.display(), state)
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
