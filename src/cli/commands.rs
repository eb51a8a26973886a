//! Command dispatch and handlers

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::Settings;
use crate::grouping::project_product;
use crate::pipeline::{load_tree, process_document};
use crate::sink::{DirSink, MemorySink};

pub fn execute_command(cli: &Cli, settings: &Settings) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Sync {
            file,
            root,
            dry_run,
        }) => _sync(file, root.as_deref(), *dry_run, settings),
        Some(Commands::Tree { file }) => _tree(file, settings),
        Some(Commands::Groups { file }) => _groups(file, settings),
        Some(Commands::Config) => _config(settings),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Ok(()),
    }
}

/// Strip the invisible left-to-right-embedding character that Windows
/// "copy as path" can wrap around a path.
fn clean_input_path(raw: &str) -> PathBuf {
    PathBuf::from(raw.trim_matches('\u{202a}'))
}

#[instrument(skip(settings))]
fn _sync(file: &str, root: Option<&std::path::Path>, dry_run: bool, settings: &Settings) -> CliResult<()> {
    let path = clean_input_path(file);
    let sink_root = root.unwrap_or(&settings.sink_root);
    debug!("file: {:?}, sink root: {:?}", path, sink_root);

    let report = if dry_run {
        let mut sink = MemorySink::new(sink_root.to_string_lossy().into_owned());
        let report = process_document(&path, settings, &mut sink)?;
        for container in sink.containers() {
            output::detail(&format!("container {}", container));
        }
        for item in sink.items() {
            output::detail(&format!("item {}", item));
        }
        report
    } else {
        let mut sink = DirSink::new(sink_root);
        process_document(&path, settings, &mut sink)?
    };

    output::action(
        "Synced",
        &format!(
            "{} products, {} variant sets, {} variants",
            report.products, report.variant_sets, report.variants
        ),
    );
    Ok(())
}

#[instrument(skip(settings))]
fn _tree(file: &str, settings: &Settings) -> CliResult<()> {
    let path = clean_input_path(file);
    let root = load_tree(&path, settings)?;
    output::info(&root.to_display_tree());
    Ok(())
}

#[instrument(skip(settings))]
fn _groups(file: &str, settings: &Settings) -> CliResult<()> {
    let path = clean_input_path(file);
    let root = load_tree(&path, settings)?;

    for product in &root.children {
        output::header(&product.name);
        let groups = project_product(product, settings.grouping_depth);
        for (group_path, variants) in groups.iter() {
            output::detail(&format!("{}: {}", group_path, variants.join(", ")));
        }
    }
    Ok(())
}

fn _config(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml());
    Ok(())
}

fn _completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
