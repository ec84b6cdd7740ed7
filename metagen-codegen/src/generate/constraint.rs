//! Constraint record generation.

use metagen_schema::ConstraintDecl;
use tracing::warn;

use crate::render::{Context, Render, TemplateName};
use crate::sanitize::sanitize;

/// Renders one constraint record per declared kind.
///
/// Only the first occurrence of a kind is honored; additional
/// occurrences are logged and skipped. Target defaults to `"."` and
/// level to `"ERROR"` when unspecified.
#[must_use]
pub fn render_constraints(constraints: &[ConstraintDecl], renderer: &dyn Render) -> Vec<String> {
    constraints
        .iter()
        .map(|decl| {
            if decl.occurrences.len() > 1 {
                warn!(
                    kind = %decl.kind,
                    ignored = decl.occurrences.len() - 1,
                    "multiple constraint occurrences of one kind, keeping the first"
                );
            }
            let first = decl.occurrences.first();

            let mut context = Context::new();
            context.insert("type".to_string(), sanitize(&decl.kind).into());
            context.insert(
                "name".to_string(),
                first.and_then(|occ| occ.name.clone()).into(),
            );
            context.insert(
                "target".to_string(),
                first
                    .and_then(|occ| occ.target.clone())
                    .unwrap_or_else(|| ".".to_string())
                    .into(),
            );
            context.insert(
                "level".to_string(),
                first
                    .and_then(|occ| occ.level.clone())
                    .unwrap_or_else(|| "ERROR".to_string())
                    .into(),
            );
            renderer.render(TemplateName::Constraints, &context)
        })
        .collect()
}
