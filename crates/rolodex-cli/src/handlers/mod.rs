pub mod config;
pub mod create;
pub mod delete;
pub mod edit;
pub mod list;
pub mod show;

use crate::context::ExecutionContext;
use crate::presentation::{Style, print_json, render_card, render_notice};
use crate::types::OutputFormat;
use anyhow::Result;
use rolodex_engine::NoticeKind;
use rolodex_runtime::HttpSession;
use rolodex_types::Contact;
use serde::Serialize;

fn connect(ctx: &ExecutionContext) -> Result<HttpSession> {
    Ok(HttpSession::connect(ctx.config()?)?)
}

/// JSON goes out as-is; plain output is rendered on demand
fn emit<T: Serialize>(
    ctx: &ExecutionContext,
    value: &T,
    plain: impl FnOnce(Style) -> String,
) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Plain => {
            print!("{}", plain(Style::detect()));
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct SavedReport<'a> {
    notice: &'static str,
    contact: &'a Contact,
}

fn report_saved(ctx: &ExecutionContext, kind: NoticeKind, contact: &Contact) -> Result<()> {
    let report = SavedReport {
        notice: kind.message(),
        contact,
    };
    emit(ctx, &report, |style| {
        format!(
            "{}{}",
            render_notice(report.notice, style),
            render_card(contact, style)
        )
    })
}
