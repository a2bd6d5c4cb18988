use anyhow::Context as _;
use mk_core::ExtraFields;
use mk_schema::{FieldValue, Schema};
use serde::Serialize;

use crate::commands::{Context, render};

#[derive(Debug, Serialize)]
pub struct ModelSummary<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<&'a str>,
    pub extra_fields: ExtraFields,
    pub fields: Vec<FieldSummary<'a>>,
}

#[derive(Debug, Serialize)]
pub struct FieldSummary<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub ty: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'a FieldValue>,
    pub constrained: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

pub fn summarize(schema: &Schema) -> ModelSummary<'_> {
    ModelSummary {
        name: schema.name(),
        parent: schema.parent(),
        extra_fields: schema.extra_fields(),
        fields: schema
            .fields()
            .iter()
            .map(|f| FieldSummary {
                name: f.name(),
                ty: f.field_type().to_string(),
                required: f.is_required(),
                default: f.default_value(),
                constrained: f.has_constraints(),
                description: f.description(),
            })
            .collect(),
    }
}

/// Handle `mkit describe <model>`.
pub fn handle(ctx: &Context, model: &str) -> anyhow::Result<()> {
    let schema = ctx
        .registry
        .get(model)
        .with_context(|| format!("unknown model '{model}'"))?;
    println!("{}", render(&summarize(schema), ctx.pretty)?);
    Ok(())
}
