//! Command dispatch: every handler loads the session, runs one action and
//! writes the tree back when it changed.

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::AnalysisReport;
use crate::application::{ApplicationError, Session};
use crate::cli::args::{Cli, Commands, ConfigCommands, GraphFormat, ProjectionArg};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_dir, global_config_path, local_config_path, Settings};
use crate::domain::forest::Forest;
use crate::domain::{build_graph, NodeStore, NodeUpdate, Status};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.project_dir.as_deref())?;
    execute_with_settings(cli, settings)
}

/// Run `cli` against already loaded settings.
pub fn execute_with_settings(cli: &Cli, settings: Settings) -> CliResult<()> {
    let project_dir = cli.project_dir.clone();
    let container = ServiceContainer::new(settings);
    let tree_file = cli
        .file
        .clone()
        .unwrap_or_else(|| container.settings.tree_file.clone());

    match &cli.command {
        Some(Commands::Build {
            goals,
            input,
            catalog,
        }) => cmd_build(&container, &tree_file, goals, input.as_deref(), catalog.as_deref()),
        Some(Commands::Show) => cmd_show(&container, &tree_file),
        Some(Commands::Add { name, parent }) => {
            cmd_add(&container, &tree_file, name, parent.as_deref())
        }
        Some(Commands::Edit {
            id,
            name,
            status,
            comment,
        }) => cmd_edit(
            &container,
            &tree_file,
            id,
            NodeUpdate {
                name: name.clone(),
                status: status.map(Status::from),
                comment: comment.clone(),
            },
        ),
        Some(Commands::Remove { id }) => cmd_remove(&container, &tree_file, id),
        Some(Commands::Analyze {
            rules,
            dry_run,
            json,
        }) => cmd_analyze(&container, &tree_file, rules.as_deref(), *dry_run, *json),
        Some(Commands::Summary) => cmd_summary(&container, &tree_file),
        Some(Commands::Graph { projection, format }) => {
            cmd_graph(&container, &tree_file, *projection, *format)
        }
        Some(Commands::Config { command }) => cmd_config(&container, project_dir.as_deref(), command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

/// Resolve a full id or a unique id prefix as shown by `show`.
fn resolve_id(nodes: &NodeStore, id: &str) -> CliResult<String> {
    if nodes.get(id).is_some() {
        return Ok(id.to_string());
    }
    let matches: Vec<&str> = nodes
        .iter()
        .filter(|n| n.id.starts_with(id))
        .map(|n| n.id.as_str())
        .collect();
    match matches.as_slice() {
        [single] => Ok(single.to_string()),
        [] => Err(CliError::InvalidArgs(format!("no node with id {id}"))),
        _ => Err(CliError::InvalidArgs(format!(
            "id prefix {id} is ambiguous ({} nodes)",
            matches.len()
        ))),
    }
}

fn read_goals(
    container: &ServiceContainer,
    goals: &[String],
    input: Option<&Path>,
) -> CliResult<Vec<String>> {
    let mut all = goals.to_vec();
    if let Some(path) = input {
        let content = container
            .fs
            .read_to_string(path)
            .map_err(|e| InfraError::io(format!("read goals {}", path.display()), e))?;
        all.extend(content.lines().map(str::to_string));
    }
    Ok(all)
}

#[instrument(skip(container))]
fn cmd_build(
    container: &ServiceContainer,
    tree_file: &Path,
    goals: &[String],
    input: Option<&Path>,
    catalog: Option<&Path>,
) -> CliResult<()> {
    let goals = read_goals(container, goals, input)?;
    if goals.iter().all(|g| g.trim().is_empty()) {
        return Err(CliError::Usage("please enter at least one goal".to_string()));
    }

    let catalog_path = catalog.unwrap_or(container.settings.questions_file.as_path());
    let catalog = container.catalog_service.load_questions(catalog_path);
    let session = container.tree_service.build_session(&goals, catalog);
    container.tree_service.save_tree(tree_file, session.nodes())?;

    let roots = session.nodes().roots().len();
    output::success(&format!(
        "Project network created: {} goals, {} nodes → {}",
        roots,
        session.nodes().len(),
        tree_file.display()
    ));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, tree_file: &Path) -> CliResult<()> {
    let session = container.tree_service.load_session(tree_file)?;
    if session.nodes().is_empty() {
        output::warning("goal tree is empty");
        return Ok(());
    }
    let forest = Forest::from_nodes(session.nodes().as_slice());
    for tree in forest.to_trees(output::node_label) {
        output::info(&tree);
    }
    let orphans = session.nodes().dangling().len();
    if orphans > 0 {
        output::warning(&format!("{orphans} node(s) reference a removed parent"));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_add(
    container: &ServiceContainer,
    tree_file: &Path,
    name: &str,
    parent: Option<&str>,
) -> CliResult<()> {
    let mut session = load_or_empty(container, tree_file)?;
    let nodes = session.nodes_mut();
    let id = match parent {
        Some(p) => {
            let parent_id = resolve_id(nodes, p)?;
            nodes.add_child(&parent_id, name)?
        }
        None => nodes.add_root(name)?,
    };
    container.tree_service.save_tree(tree_file, session.nodes())?;
    output::action("Added", &format!("{} ({})", name.trim(), id));
    Ok(())
}

/// `add` may start a tree from scratch.
fn load_or_empty(container: &ServiceContainer, tree_file: &Path) -> CliResult<Session> {
    if container.fs.exists(tree_file) {
        Ok(container.tree_service.load_session(tree_file)?)
    } else {
        debug!("{} does not exist, starting empty tree", tree_file.display());
        Ok(Session::default())
    }
}

#[instrument(skip(container))]
fn cmd_edit(
    container: &ServiceContainer,
    tree_file: &Path,
    id: &str,
    update: NodeUpdate,
) -> CliResult<()> {
    if update == NodeUpdate::default() {
        return Err(CliError::Usage(
            "nothing to change, use --name, --status or --comment".to_string(),
        ));
    }
    let mut session = container.tree_service.load_session(tree_file)?;
    let id = resolve_id(session.nodes(), id)?;
    let node = session.nodes_mut().update(&id, update)?.clone();
    container.tree_service.save_tree(tree_file, session.nodes())?;
    output::action(
        "Updated",
        &format!("{} {} [{}]", output::status_dot(node.status), node.name, node.status),
    );
    Ok(())
}

#[instrument(skip(container))]
fn cmd_remove(container: &ServiceContainer, tree_file: &Path, id: &str) -> CliResult<()> {
    let mut session = container.tree_service.load_session(tree_file)?;
    let id = resolve_id(session.nodes(), id)?;
    let orphans = session.nodes().children(&id).len();
    let removed = session.nodes_mut().remove(&id)?;
    container.tree_service.save_tree(tree_file, session.nodes())?;
    output::action("Removed", &removed.name);
    if orphans > 0 {
        output::warning(&format!(
            "{orphans} child node(s) of {:?} were kept and now have no parent",
            removed.name
        ));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_analyze(
    container: &ServiceContainer,
    tree_file: &Path,
    rules: Option<&Path>,
    dry_run: bool,
    json: bool,
) -> CliResult<()> {
    let mut session = container.tree_service.load_session(tree_file)?;
    if session.nodes().is_empty() {
        return Err(CliError::Usage(
            "no goal tree available, create or load one first".to_string(),
        ));
    }
    let rules_path = rules.unwrap_or(container.settings.rules_file.as_path());
    let rules = container.catalog_service.load_rules(rules_path);
    let report = container.analysis_service.run(&mut session, &rules)?;

    if !dry_run {
        container.tree_service.save_tree(tree_file, session.nodes())?;
    }

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|source| ApplicationError::Render {
                what: "report",
                source,
            })?;
        output::info(&rendered);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    let m = &report.metrics;
    output::header("Key Metrics");
    for status in Status::ALL {
        output::detail(&format!(
            "{} {:<6} {}/{} ({:.0}%)",
            output::status_dot(status),
            status,
            m.count(status),
            m.total,
            m.pct(status) * 100.0
        ));
    }
    output::detail(&format!("  Total  {}", m.total));

    println!();
    output::header("Critical Paths");
    if report.critical_paths.is_empty() {
        output::detail("No red nodes.");
    }
    for path in &report.critical_paths {
        output::detail(&format_path(path));
    }

    println!();
    output::header("Summary");
    output::info(&report.summary);

    println!();
    output::header("Recommendations");
    if report.recommendations.is_empty() {
        output::detail("No recommendations based on current rules.");
    }
    for rec in &report.recommendations {
        output::info(&format!("- {rec}"));
    }
}

/// All but the last element bold, joined by arrows.
fn format_path(path: &[String]) -> String {
    match path.split_last() {
        Some((last, ancestors)) => ancestors
            .iter()
            .map(|name| format!("**{name}**"))
            .chain(std::iter::once(last.clone()))
            .join(" → "),
        None => String::new(),
    }
}

#[instrument(skip(container))]
fn cmd_summary(container: &ServiceContainer, tree_file: &Path) -> CliResult<()> {
    let session = container.tree_service.load_session(tree_file)?;
    output::info(&crate::domain::generate_summary(session.nodes().as_slice()));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_graph(
    container: &ServiceContainer,
    tree_file: &Path,
    projection: ProjectionArg,
    format: GraphFormat,
) -> CliResult<()> {
    let session = container.tree_service.load_session(tree_file)?;
    let graph = build_graph(session.nodes().as_slice(), projection.into());
    match format {
        GraphFormat::Json => {
            let json = graph.to_json().map_err(|source| ApplicationError::Render {
                what: "graph",
                source,
            })?;
            output::info(&json);
        }
        GraphFormat::Mermaid => output::info(&graph.to_mermaid()),
    }
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    project_dir: Option<&Path>,
    command: &ConfigCommands,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(p) => output::action("global", &p.display()),
                None => output::warning("cannot determine global config directory"),
            }
            let local = local_config_path(&project_dir_or_cwd(project_dir)?);
            output::action("local", &local.display());
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                let dir = global_config_dir().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?;
                dir.join("goaltree.toml")
            } else {
                local_config_path(&project_dir_or_cwd(project_dir)?)
            };
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .and_then(|_| container.fs.write(&path, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
    }
}

fn project_dir_or_cwd(project_dir: Option<&Path>) -> CliResult<PathBuf> {
    match project_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("determine current directory", e).into()),
    }
}
