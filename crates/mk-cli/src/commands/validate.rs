use std::io::Read;
use std::path::Path;

use anyhow::Context as _;
use mk_schema::{DecodeError, RegistryError, to_text, to_text_pretty};

use crate::commands::{Context, render};

/// Outcome of validating one document.
#[derive(Debug)]
pub enum Outcome {
    /// Serialized instance text.
    Valid(String),
    /// Rendered error report and its entry count.
    Invalid { rendered: String, count: usize },
}

/// Handle `mkit validate <model> [file]`.
pub fn handle(ctx: &Context, model: &str, file: Option<&Path>) -> anyhow::Result<()> {
    let text = read_input(file)?;
    match check(ctx, model, &text)? {
        Outcome::Valid(out) => {
            println!("{out}");
            Ok(())
        }
        Outcome::Invalid { rendered, count } => {
            println!("{rendered}");
            anyhow::bail!("{model}: {count} validation error(s)")
        }
    }
}

/// Validate `text` against `model`. Validation failures are an `Outcome`,
/// not an error; unknown models and malformed JSON are errors.
pub fn check(ctx: &Context, model: &str, text: &str) -> anyhow::Result<Outcome> {
    match ctx.registry.from_text(model, text, &ctx.options) {
        Ok(instance) => {
            tracing::debug!(model, "document is valid");
            let out = if ctx.pretty {
                to_text_pretty(&instance)
            } else {
                to_text(&instance)
            };
            Ok(Outcome::Valid(out))
        }
        Err(RegistryError::Decode(DecodeError::Invalid(report))) => Ok(Outcome::Invalid {
            rendered: render(&report.errors, ctx.pretty)?,
            count: report.len(),
        }),
        Err(RegistryError::Schema(error)) => {
            Err(error).with_context(|| format!("unknown model '{model}'"))
        }
        Err(error) => Err(error).context("failed to decode input"),
    }
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
