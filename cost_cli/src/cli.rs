//! Command-line interface definition using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Costwise - construction cost estimates from the terminal
#[derive(Parser, Debug)]
#[command(name = "costwise")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the project store file
    #[arg(short, long, env = "COSTWISE_STORE", global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate a project's costs
    Estimate {
        #[command(flatten)]
        project: ProjectArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Save the estimate to the project store
        #[arg(long)]
        save: bool,

        /// User recorded on the store lock
        #[arg(short, long, env = "USER", default_value = "costwise")]
        user: String,
    },

    /// List saved projects, newest first
    List {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show the report for a saved project (recomputed from its input)
    Show {
        /// Project ID
        #[arg(required = true)]
        id: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check a saved project's cached figures against a recomputation
    Verify {
        /// Project ID
        #[arg(required = true)]
        id: String,
    },

    /// Remove a saved project
    Remove {
        /// Project ID
        #[arg(required = true)]
        id: String,

        #[arg(short, long, env = "USER", default_value = "costwise")]
        user: String,
    },

    /// List reference material rates
    Materials {
        /// Only show one category (foundation, structure, exterior, roofing, labor, equipment)
        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Project parameters, either from a JSON file or individual flags.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Read the project from a JSON file (flags below are then ignored)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Project name
    #[arg(long, required_unless_present = "input")]
    pub name: Option<String>,

    /// Project type (residential, commercial, industrial, infrastructure)
    #[arg(long = "type", default_value = "commercial")]
    pub project_type: String,

    /// Length (ft)
    #[arg(long, required_unless_present = "input")]
    pub length: Option<f64>,

    /// Width (ft)
    #[arg(long, required_unless_present = "input")]
    pub width: Option<f64>,

    /// Height (ft)
    #[arg(long, required_unless_present = "input")]
    pub height: Option<f64>,

    /// Foundation (concrete, reinforced, pile)
    #[arg(long, default_value = "concrete")]
    pub foundation: String,

    /// Structure (steel, concrete, wood)
    #[arg(long, default_value = "steel")]
    pub structure: String,

    /// Exterior (brick, concrete, metal, glass)
    #[arg(long, default_value = "glass")]
    pub exterior: String,

    /// Roofing (metal, shingle, membrane)
    #[arg(long, default_value = "metal")]
    pub roofing: String,

    /// Labor rate ($/hour)
    #[arg(long, required_unless_present = "input")]
    pub labor_rate: Option<f64>,

    /// Labor hours
    #[arg(long, required_unless_present = "input")]
    pub labor_hours: Option<f64>,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,
}

/// Output format for reports and listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Cli {
    /// Returns the store path, using `~/.costwise/projects.cwp` if not specified.
    pub fn store_path(&self) -> PathBuf {
        self.store.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".costwise"))
                .unwrap_or_else(|| PathBuf::from(".costwise"))
                .join("projects.cwp")
        })
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
