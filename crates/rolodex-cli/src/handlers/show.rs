use super::{connect, emit};
use crate::context::ExecutionContext;
use crate::presentation::render_card;
use anyhow::Result;
use rolodex_types::ContactId;

pub async fn handle(ctx: &ExecutionContext, id: ContactId) -> Result<()> {
    let mut session = connect(ctx)?;
    session.open(id).await?;

    let contact = session.book().editor().draft();
    emit(ctx, contact, |style| render_card(contact, style))
}
