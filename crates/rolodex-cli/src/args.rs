use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};
use rolodex_types::ContactId;

#[derive(Parser)]
#[command(name = "rolodex")]
#[command(about = "Browse and edit a remote contact directory", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Directory holding config.toml")]
    pub data_dir: Option<String>,

    #[arg(long, global = true, help = "Contact store base URL (overrides config)")]
    pub base_url: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List contacts page by page")]
    List {
        #[arg(long, default_value = "1", help = "Number of pages to load")]
        pages: u32,

        #[arg(long, conflicts_with = "pages", help = "Load every page")]
        all: bool,
    },

    #[command(about = "Show one contact")]
    Show { id: ContactId },

    #[command(about = "Create a new contact")]
    Create {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long = "email", help = "Email address (repeatable)")]
        emails: Vec<String>,
    },

    #[command(about = "Edit an existing contact")]
    Edit {
        id: ContactId,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long = "add-email", help = "Email address to add (repeatable)")]
        add_emails: Vec<String>,

        #[arg(long = "remove-email", help = "Email address to remove (repeatable)")]
        remove_emails: Vec<String>,
    },

    #[command(about = "Delete a contact")]
    Delete { id: ContactId },

    #[command(about = "Inspect or create the configuration file")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Print the effective configuration")]
    Show,

    #[command(about = "Write config.toml (takes the global --base-url)")]
    Init {
        #[arg(long)]
        items_per_page: Option<u32>,

        #[arg(long)]
        timeout_secs: Option<u64>,

        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}
