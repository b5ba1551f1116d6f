use super::{connect, report_saved};
use crate::context::ExecutionContext;
use anyhow::Result;
use rolodex_types::ContactId;
use tracing::warn;

pub async fn handle(
    ctx: &ExecutionContext,
    id: ContactId,
    first_name: Option<String>,
    last_name: Option<String>,
    add_emails: Vec<String>,
    remove_emails: Vec<String>,
) -> Result<()> {
    let mut session = connect(ctx)?;
    session.open(id).await?;

    let book = session.book_mut();
    if let Some(value) = first_name {
        book.set_first_name(value)?;
    }
    if let Some(value) = last_name {
        book.set_last_name(value)?;
    }
    // Removals first so re-adding an address already on file is not a duplicate
    for email in &remove_emails {
        if !book.remove_email(email)? {
            warn!(email = %email, "email not on file; nothing removed");
        }
    }
    for email in &add_emails {
        book.add_email(email)?;
    }

    let kind = session.commit().await?;
    report_saved(ctx, kind, session.book().editor().draft())
}
