use super::args::{Cli, Commands, ConfigCommand};
use super::handlers;
use crate::context::ExecutionContext;
use anyhow::Result;
use rolodex_runtime::resolve_data_path;

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_path(cli.data_dir.as_deref())?;
    let ctx = ExecutionContext::new(data_dir, cli.base_url, cli.format);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match cli.command {
            Commands::List { pages, all } => handlers::list::handle(&ctx, pages, all).await,
            Commands::Show { id } => handlers::show::handle(&ctx, id).await,
            Commands::Create {
                first_name,
                last_name,
                emails,
            } => handlers::create::handle(&ctx, first_name, last_name, emails).await,
            Commands::Edit {
                id,
                first_name,
                last_name,
                add_emails,
                remove_emails,
            } => {
                handlers::edit::handle(&ctx, id, first_name, last_name, add_emails, remove_emails)
                    .await
            }
            Commands::Delete { id } => handlers::delete::handle(&ctx, id).await,
            Commands::Config { command } => match command {
                ConfigCommand::Show => handlers::config::show(&ctx),
                ConfigCommand::Init {
                    items_per_page,
                    timeout_secs,
                    force,
                } => handlers::config::init(&ctx, items_per_page, timeout_secs, force),
            },
        }
    })
}
