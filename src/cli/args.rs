use clap::{Args, Parser, Subcommand};

use crate::context::{Builder, Framework};

pub const DEFAULT_CHECKPOINT_FILE: &str = ".autoglot-cache.json";

/// Autoglot CLI - AI-assisted vue-i18n setup for frontend projects
#[derive(Parser)]
#[command(name = "autoglot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add i18n support to the project in the current directory
    Run(RunArgs),
    /// Show the checkpoint state for the current directory
    Status {
        /// Checkpoint file path, relative to the project root
        #[arg(long, default_value = DEFAULT_CHECKPOINT_FILE)]
        checkpoint_file: String,
    },
    /// Delete the checkpoint so the next run starts fresh
    Reset {
        /// Checkpoint file path, relative to the project root
        #[arg(long, default_value = DEFAULT_CHECKPOINT_FILE)]
        checkpoint_file: String,
    },
}

#[derive(Args)]
pub struct RunArgs {
    /// Target framework
    #[arg(long, value_enum, default_value = "vue")]
    pub framework: Framework,

    /// Build tool
    #[arg(long, value_enum, default_value = "vite")]
    pub builder: Builder,

    /// Builder config file
    #[arg(long, default_value = "vite.config.ts")]
    pub builder_config: String,

    /// Application entry file
    #[arg(long, default_value = "src/main.ts")]
    pub main_file: String,

    /// Glob selecting the files to translate
    #[arg(long, default_value = "src/**/*.vue")]
    pub glob: String,

    /// Default locale code
    #[arg(long, default_value = "en-US")]
    pub default_locale: String,

    /// Locale codes to generate, comma separated (e.g. ja-JP,zh-TW)
    #[arg(long, value_delimiter = ',', required = true)]
    pub locales: Vec<String>,

    /// Skip the dependency-install stage
    #[arg(long)]
    pub skip_install: bool,

    /// Skip patching the builder config
    #[arg(long)]
    pub skip_builder_config: bool,

    /// Skip patching the entry file
    #[arg(long)]
    pub skip_main_config: bool,

    /// Checkpoint file path, relative to the project root
    #[arg(long, default_value = DEFAULT_CHECKPOINT_FILE)]
    pub checkpoint_file: String,

    /// Generation model to use
    #[arg(short = 'm', long)]
    pub model: Option<String>,
}
