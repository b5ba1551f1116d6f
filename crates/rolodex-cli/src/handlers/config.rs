use crate::context::ExecutionContext;
use crate::presentation::print_json;
use crate::types::OutputFormat;
use anyhow::{Result, bail};
use rolodex_runtime::Config;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct ConfigReport<'a> {
    path: &'a Path,
    exists: bool,
    config: &'a Config,
}

pub fn show(ctx: &ExecutionContext) -> Result<()> {
    let path = ctx.config_path();
    let config = ctx.config()?;

    match ctx.format {
        OutputFormat::Json => print_json(&ConfigReport {
            path: &path,
            exists: path.exists(),
            config,
        }),
        OutputFormat::Plain => {
            if path.exists() {
                println!("# {}", path.display());
            } else {
                println!("# {} (not found, using defaults)", path.display());
            }
            print!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
    }
}

pub fn init(
    ctx: &ExecutionContext,
    items_per_page: Option<u32>,
    timeout_secs: Option<u64>,
    force: bool,
) -> Result<()> {
    let path = ctx.config_path();
    if path.exists() && !force {
        bail!(
            "Configuration already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    let mut config = Config::default();
    if let Some(url) = ctx.base_url_override() {
        config.gateway.base_url = url.to_string();
    }
    if let Some(n) = items_per_page {
        config.paging.items_per_page = n;
    }
    if let Some(secs) = timeout_secs {
        config.gateway.timeout_secs = secs;
    }
    config.save_to(&path)?;

    match ctx.format {
        OutputFormat::Json => print_json(&ConfigReport {
            path: &path,
            exists: true,
            config: &config,
        }),
        OutputFormat::Plain => {
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}
