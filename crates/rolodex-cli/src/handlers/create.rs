use super::{connect, report_saved};
use crate::context::ExecutionContext;
use anyhow::Result;

pub async fn handle(
    ctx: &ExecutionContext,
    first_name: String,
    last_name: String,
    emails: Vec<String>,
) -> Result<()> {
    let mut session = connect(ctx)?;

    let book = session.book_mut();
    book.set_first_name(first_name)?;
    book.set_last_name(last_name)?;
    for email in &emails {
        book.add_email(email)?;
    }

    let kind = session.commit().await?;
    report_saved(ctx, kind, session.book().editor().draft())
}
