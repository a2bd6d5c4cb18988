use crate::commands::{Context, render};

/// Handle `mkit models`.
pub fn handle(ctx: &Context) -> anyhow::Result<()> {
    println!("{}", render(&ctx.registry.list(), ctx.pretty)?);
    Ok(())
}
