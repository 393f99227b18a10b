//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::Snapshot;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands, FilterArgs};
use crate::cli::output;
use crate::cli::render::{render_forest, RenderOptions};
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{FilterCriteria, LocationKind};
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Cli::command()
            .print_help()
            .map_err(|e| CliError::io("print help", e));
    };

    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Config { command } => cmd_config(cli, command),
        Commands::Init { path, force } => {
            let container = build_container(cli)?;
            cmd_init(&container, path.as_deref(), *force)
        }
        Commands::Tree {
            filter,
            expand_all,
            collapse_all,
            reveal,
            toggle,
        } => {
            let container = build_container(cli)?;
            let expansion = TreeExpansion {
                expand_all: *expand_all,
                collapse_all: *collapse_all,
                reveal,
                toggle,
            };
            cmd_tree(&container, filter, &expansion)
        }
        Commands::Roots { filter } => cmd_roots(&build_container(cli)?, filter),
        Commands::Stats => cmd_stats(&build_container(cli)?),
        Commands::Warehouses => cmd_warehouses(&build_container(cli)?),
        Commands::Check => cmd_check(&build_container(cli)?),
        Commands::Show { id } => cmd_show(&build_container(cli)?, id),
    }
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir().map_err(|e| CliError::io("get current directory", e)),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let dir = project_dir(cli)?;
    let mut settings = Settings::load(Some(&dir))?;
    if let Some(snapshot) = &cli.snapshot {
        settings.snapshot = snapshot.clone();
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn build_container(cli: &Cli) -> CliResult<ServiceContainer> {
    Ok(ServiceContainer::new(load_settings(cli)?))
}

/// Translate filter flags into criteria; the configured default warehouse
/// applies when `--warehouse` is absent.
pub fn build_criteria(args: &FilterArgs, settings: &Settings) -> CliResult<FilterCriteria> {
    let mut criteria = FilterCriteria::new();
    if let Some(warehouse) = args
        .warehouse
        .as_ref()
        .or(settings.default_warehouse.as_ref())
    {
        criteria = criteria.with_warehouse(warehouse.as_str());
    }
    if let Some(kind) = &args.kind {
        criteria = criteria
            .with_kind_str(kind)
            .map_err(|e| CliError::InvalidArgs(e.to_string()))?;
    }
    if let Some(search) = &args.search {
        criteria = criteria.with_search(search.as_str());
    }
    Ok(criteria)
}

struct TreeExpansion<'a> {
    expand_all: bool,
    collapse_all: bool,
    reveal: &'a [String],
    toggle: &'a [String],
}

#[instrument(skip(container, expansion))]
fn cmd_tree(
    container: &ServiceContainer,
    filter: &FilterArgs,
    expansion: &TreeExpansion<'_>,
) -> CliResult<()> {
    let criteria = build_criteria(filter, &container.settings)?;
    let mut hierarchy = container.load_hierarchy()?;

    if expansion.expand_all {
        hierarchy.expand_all();
    }
    if expansion.collapse_all {
        hierarchy.collapse_all();
    }
    for id in expansion.reveal {
        hierarchy.reveal(id)?;
    }
    for id in expansion.toggle {
        hierarchy.toggle(id);
    }

    let options = RenderOptions {
        show_item_counts: container.settings.show_item_counts,
    };
    let trees = render_forest(&hierarchy, &criteria, &options);
    if trees.is_empty() {
        output::warning("no locations match the filter");
    }
    for tree in trees {
        print!("{}", tree);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_roots(container: &ServiceContainer, filter: &FilterArgs) -> CliResult<()> {
    let criteria = build_criteria(filter, &container.settings)?;
    let hierarchy = container.load_hierarchy()?;

    for root in hierarchy.filtered_roots(&criteria) {
        output::row([
            root.record.id.as_str(),
            root.record.name.as_str(),
            root.record.kind.as_str(),
            root.record.warehouse_id.as_str(),
        ]);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_stats(container: &ServiceContainer) -> CliResult<()> {
    let hierarchy = container.load_hierarchy()?;
    let stats = hierarchy.stats();

    output::header("Locations");
    output::field("total", &stats.total);
    for kind in LocationKind::ALL {
        output::field(kind.as_str(), &stats.count(kind));
    }
    output::field("scrap", &stats.scrap_count);
    output::field("return", &stats.return_count);
    output::field("items", &stats.total_items);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_warehouses(container: &ServiceContainer) -> CliResult<()> {
    let hierarchy = container.load_hierarchy()?;
    let default = container.settings.default_warehouse.as_deref();

    for (id, label) in hierarchy.warehouse_options() {
        let marker = if Some(id.as_str()) == default { "*" } else { " " };
        output::row([format!("{} {}", marker, id), label]);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_check(container: &ServiceContainer) -> CliResult<()> {
    let hierarchy = container.load_hierarchy()?;
    let forest = hierarchy.forest();

    for orphan in forest.orphan_ids() {
        let parent = forest
            .find(orphan)
            .and_then(|node| node.record.parent_id.as_deref())
            .unwrap_or_default();
        output::warning(&format!(
            "parent {} of location {} not found, shown as root",
            parent, orphan
        ));
    }
    output::success(&format!(
        "{}: {} locations, {} roots, {} levels",
        container.settings.snapshot.display(),
        forest.len(),
        forest.roots().len(),
        forest.max_depth()
    ));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, id: &str) -> CliResult<()> {
    let hierarchy = container.load_hierarchy()?;
    let forest = hierarchy.forest();
    let (idx, node) = forest
        .index_of(id)
        .and_then(|idx| forest.get_node(idx).map(|node| (idx, node)))
        .ok_or_else(|| ApplicationError::LocationNotFound(id.to_string()))?;

    let breadcrumb = forest
        .ancestors(id)
        .into_iter()
        .rev()
        .map(|ancestor| ancestor.record.name.as_str())
        .chain(std::iter::once(node.record.name.as_str()))
        .join(" / ");
    let subtree_items: u64 = forest
        .iter_subtree(idx)
        .map(|(_, n)| n.record.item_count)
        .sum();
    let warehouse = hierarchy
        .warehouse_name(&node.record.warehouse_id)
        .unwrap_or(&node.record.warehouse_id);

    output::header(&breadcrumb);
    output::field("id", &node.record.id);
    output::field("path", node.record.display_path());
    output::field("warehouse", warehouse);
    output::field("kind", &node.record.kind);
    output::field("depth", &node.depth);
    output::field("scrap", &node.record.is_scrap_location);
    output::field("return", &node.record.is_return_location);
    output::field("items", &node.record.item_count);
    output::field("subtree items", &subtree_items);
    for child in node.children.iter().filter_map(|&c| forest.get_node(c)) {
        output::detail(&format!("- {}", child.record));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_init(container: &ServiceContainer, path: Option<&Path>, force: bool) -> CliResult<()> {
    let target = path.unwrap_or(&container.settings.snapshot);
    container
        .snapshots
        .save(target, &Snapshot::sample(), force)?;
    output::success(&format!("wrote sample snapshot: {}", target.display()));
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::field("global", &path.display()),
                None => output::field("global", "(no config directory)"),
            }
            let dir = project_dir(cli)?;
            output::field("local", &local_config_path(&dir).display());
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_warehouse_flag_when_building_criteria_then_uses_default_warehouse() {
        let settings = Settings {
            default_warehouse: Some("WH".to_string()),
            ..Settings::default()
        };

        let criteria = build_criteria(&FilterArgs::default(), &settings).unwrap();

        assert_eq!(criteria.warehouse_id.as_deref(), Some("WH"));
    }

    #[test]
    fn given_all_warehouse_flag_when_building_criteria_then_overrides_default() {
        let settings = Settings {
            default_warehouse: Some("WH".to_string()),
            ..Settings::default()
        };
        let args = FilterArgs {
            warehouse: Some("all".to_string()),
            ..FilterArgs::default()
        };

        let criteria = build_criteria(&args, &settings).unwrap();

        assert!(criteria.is_unconstrained());
    }

    #[test]
    fn given_unknown_kind_flag_when_building_criteria_then_invalid_args() {
        let args = FilterArgs {
            kind: Some("shelf".to_string()),
            ..FilterArgs::default()
        };

        let err = build_criteria(&args, &Settings::default()).unwrap_err();

        assert!(matches!(err, CliError::InvalidArgs(_)));
    }
}
