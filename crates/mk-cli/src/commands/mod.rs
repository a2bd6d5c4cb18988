use mk_core::ValidateOptions;
use mk_schema::SchemaRegistry;

use crate::cli::Commands;

pub mod describe;
pub mod models;
pub mod validate;

/// Everything a command handler needs.
pub struct Context {
    pub registry: SchemaRegistry,
    pub options: ValidateOptions,
    pub pretty: bool,
}

/// Route a parsed command to its handler.
pub fn dispatch(command: &Commands, ctx: &Context) -> anyhow::Result<()> {
    match command {
        Commands::Models => models::handle(ctx),
        Commands::Describe { model } => describe::handle(ctx, model),
        Commands::Validate { model, file } => validate::handle(ctx, model, file.as_deref()),
    }
}

/// Render a serializable value as JSON text.
pub fn render<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

#[cfg(test)]
pub(crate) fn test_context() -> Context {
    let mut registry = SchemaRegistry::new();
    mk_schema::catalog::register_all(&mut registry).expect("catalog defines");
    Context {
        registry,
        options: ValidateOptions::default(),
        pretty: false,
    }
}
