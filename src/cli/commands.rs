//! CLI command definitions using clap.
//!
//! Subcommands cover the wizard steps end to end:
//! - questions: generate clarifying questions for an app idea
//! - prd: synthesize a PRD from the idea and answers
//! - estimate: estimate build cost for a PRD
//! - build: run the iterative build loop

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Buildr - an iterative AI app builder
#[derive(Parser, Debug)]
#[command(name = "buildr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate clarifying questions for an app description
    Questions {
        /// What the user wants to build
        description: String,
    },

    /// Generate a PRD from a description and answered questions
    Prd {
        /// What the user wants to build
        description: String,

        /// YAML file mapping each question to its answer
        #[arg(short, long)]
        answers_file: Option<PathBuf>,
    },

    /// Estimate the cost of building an app from its PRD
    Estimate {
        /// Path to the PRD markdown file
        #[arg(short, long)]
        prd_file: PathBuf,
    },

    /// Run the iterative build loop against a PRD
    Build {
        /// Path to the PRD markdown file
        #[arg(short, long)]
        prd_file: PathBuf,

        /// Name of the application to build
        #[arg(short, long)]
        name: String,

        /// Iteration budget for the run
        #[arg(short = 'i', long)]
        max_iterations: Option<u32>,

        /// Directory to write the final output and artifacts into
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}
