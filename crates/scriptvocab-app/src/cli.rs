use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "scriptvocab", version, about = "Personal vocabulary and script translation client")]
pub struct Cli {
    /// JSON config file; environment variables are used when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Sign in as this user at startup
    #[arg(long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and edit the personal dictionary
    Dictionary,
    /// Submit text or a file to the translation API
    Translate(TranslateArgs),
}

#[derive(Debug, Clone, Args)]
#[command(group(ArgGroup::new("input").required(true).args(["text", "file"])))]
pub struct TranslateArgs {
    /// Text to analyse
    #[arg(long)]
    pub text: Option<String>,

    /// File to upload instead of text
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Input language code, or "auto"
    #[arg(long)]
    pub from: Option<String>,

    /// Output language code
    #[arg(long)]
    pub to: Option<String>,

    /// Minimum word size, 1 to 20
    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    pub min_word_size: i64,

    /// Minimum appearances, 1 to 20
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub min_appearance: i64,
}
