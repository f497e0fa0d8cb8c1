//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::{Projection, Status};

/// Project goal trees: traffic-light status roll-up, critical paths, rule-based recommendations
#[derive(Parser, Debug)]
#[command(name = "goaltree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Goal tree file (default: from config, project_network.json)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Project directory holding .goaltree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a goal tree from goal texts (replaces the current tree)
    Build {
        /// Goals, one per argument
        goals: Vec<String>,
        /// Read additional goals from a file, one per line
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
        /// Question catalog (default: from config)
        #[arg(long, value_hint = ValueHint::FilePath)]
        catalog: Option<PathBuf>,
    },

    /// Show the goal tree
    Show,

    /// Add a node
    Add {
        /// Node name
        name: String,
        /// Parent node id (omit for a new main goal)
        #[arg(short, long)]
        parent: Option<String>,
    },

    /// Change name, status or comment of a node
    Edit {
        /// Node id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,
        #[arg(short, long)]
        comment: Option<String>,
    },

    /// Remove a node (children are kept)
    Remove {
        /// Node id
        id: String,
    },

    /// Roll up statuses and show metrics, critical paths, summary and recommendations
    Analyze {
        /// Recommendation rules (default: from config)
        #[arg(long, value_hint = ValueHint::FilePath)]
        rules: Option<PathBuf>,
        /// Do not write rolled-up statuses back to the tree file
        #[arg(long)]
        dry_run: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the markdown summary of red and yellow nodes
    Summary,

    /// Export the tree as a drawable graph
    Graph {
        /// 2-D network (flat) or 3-D scatter (spatial) drawing hints
        #[arg(short, long, value_enum, default_value_t = ProjectionArg::Flat)]
        projection: ProjectionArg,
        #[arg(long, value_enum, default_value_t = GraphFormat::Json)]
        format: GraphFormat,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusArg {
    Red,
    Yellow,
    Green,
}

impl From<StatusArg> for Status {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Red => Status::Red,
            StatusArg::Yellow => Status::Yellow,
            StatusArg::Green => Status::Green,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionArg {
    Flat,
    Spatial,
}

impl From<ProjectionArg> for Projection {
    fn from(arg: ProjectionArg) -> Self {
        match arg {
            ProjectionArg::Flat => Projection::Flat,
            ProjectionArg::Spatial => Projection::Spatial,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    Json,
    Mermaid,
}
