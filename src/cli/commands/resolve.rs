//! Resolve Command
//!
//! Usage:
//!   officeflow resolve <LINK>

use crate::cli::CommandContext;
use crate::types::{FlowError, Result};
use crate::wiki::resolve_link;

/// Resolve one documentation link and print its page id
pub async fn run(ctx: &CommandContext, link: &str) -> Result<()> {
    let client = ctx.wiki_client()?;

    match resolve_link(&client, link.trim()).await? {
        Some(id) => {
            ctx.output.value(id);
            Ok(())
        }
        None => Err(FlowError::link(link, "no page found")),
    }
}
