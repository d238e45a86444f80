use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tn", about = concat!("tasknote v", env!("CARGO_PKG_VERSION"), " - task notes from templates"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different vault directory
    #[arg(short = 'C', long = "vault-dir", global = true)]
    pub vault_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a task vault in the current directory
    Init(InitArgs),
    /// Create a task note from the template
    New(NewArgs),
    /// Show or edit settings
    Config(ConfigCmd),
}

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing tasknote.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct NewArgs {
    /// Task title (prompted for when omitted)
    pub title: Option<String>,
}

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print all settings (default)
    Show,
    /// Print one setting
    Get(ConfigGetArgs),
    /// Set one setting and persist it
    Set(ConfigSetArgs),
}

#[derive(Args)]
pub struct ConfigGetArgs {
    /// Setting key (e.g. tasks_dir)
    pub key: String,
}

#[derive(Args)]
pub struct ConfigSetArgs {
    /// Setting key (e.g. tasks_dir)
    pub key: String,
    /// New value
    pub value: String,
}
