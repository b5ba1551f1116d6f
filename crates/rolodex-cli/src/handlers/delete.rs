use super::{connect, emit};
use crate::context::ExecutionContext;
use crate::presentation::render_notice;
use anyhow::Result;
use rolodex_engine::NoticeKind;
use rolodex_types::ContactId;
use serde::Serialize;

#[derive(Serialize)]
struct DeletedReport {
    notice: &'static str,
    id: ContactId,
}

pub async fn handle(ctx: &ExecutionContext, id: ContactId) -> Result<()> {
    let mut session = connect(ctx)?;
    session.open(id).await?;
    let id = session.remove().await?;

    let report = DeletedReport {
        notice: NoticeKind::Deleted.message(),
        id,
    };
    emit(ctx, &report, |style| render_notice(report.notice, style))
}
