use super::{connect, emit};
use crate::context::ExecutionContext;
use crate::presentation::{ContactListing, render_listing};
use anyhow::Result;
use tracing::info;

pub async fn handle(ctx: &ExecutionContext, pages: u32, all: bool) -> Result<()> {
    let mut session = connect(ctx)?;
    let limit = if all { None } else { Some(pages.max(1)) };
    let loaded = session.load_pages(limit).await?;

    let list = session.book().list();
    info!(pages = loaded, entries = list.len(), "listing loaded");
    let listing = ContactListing {
        contacts: list.entries().to_vec(),
        total_items: list.total_items(),
        pages_loaded: list.page(),
        can_load_more: list.can_load_more(),
    };
    emit(ctx, &listing, |style| render_listing(&listing, style))
}
