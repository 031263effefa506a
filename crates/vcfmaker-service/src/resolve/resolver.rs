use vcfmaker_core::types::FieldKind;

use super::strategy::ResolutionStrategy;
use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Picks the column that supplies `kind`.
///
/// An empty `requested` means nothing was asked for. See the module docs for
/// the order of the tiers.
///
/// ## Errors
/// Returns `ValidationError` if `columns` is empty, or whatever the strategy
/// returns when its own I/O fails.
pub fn resolve_field(
    columns: &[String],
    requested: &str,
    kind: FieldKind,
    strategy: &mut dyn ResolutionStrategy,
) -> ServiceResult<String> {
    let Some(first) = columns.first() else {
        return Err(ServiceError::ValidationError(format!(
            "no columns available for the {kind} field"
        )));
    };

    if !requested.is_empty() {
        if columns.iter().any(|c| c == requested) {
            return Ok(requested.to_string());
        }
        tracing::warn!(%kind, requested, "Requested field not found in CSV headers");
    }

    if let Some(column) = strategy.choose(columns, kind)? {
        tracing::debug!(%kind, %column, "Field chosen by strategy");
        return Ok(column);
    }

    if let Some(column) = heuristic_match(columns, kind) {
        tracing::debug!(%kind, %column, "Field matched by heuristics");
        return Ok(column.clone());
    }

    tracing::debug!(%kind, column = %first, "Field defaulted to first column");
    Ok(first.clone())
}

/// First column whose lowercase name equals one of the `kind` keywords,
/// trying keywords in priority order.
#[must_use]
pub fn heuristic_match(columns: &[String], kind: FieldKind) -> Option<&String> {
    kind.heuristics()
        .iter()
        .find_map(|keyword| columns.iter().find(|c| c.to_lowercase() == *keyword))
}

/// A resolved phone column with the label that was requested for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneColumn {
    pub field: String,
    /// `None` when no label was given at this column's position, or when the
    /// column came from fallback resolution.
    pub label: Option<String>,
}

/// ## Summary
/// Keeps the requested phone columns the source has, in request order, each
/// with the label at its position in `labels`. When none survive, a single
/// phone column is resolved through [`resolve_field`] without an exact-match
/// request and carries no label.
///
/// ## Errors
/// Returns `ValidationError` if `columns` is empty, or any error from the
/// strategy.
pub fn resolve_phone_fields(
    columns: &[String],
    requested: &[String],
    labels: &[String],
    strategy: &mut dyn ResolutionStrategy,
) -> ServiceResult<Vec<PhoneColumn>> {
    let mut kept = Vec::with_capacity(requested.len());
    for (idx, field) in requested.iter().enumerate() {
        if columns.contains(field) {
            kept.push(PhoneColumn {
                field: field.clone(),
                label: labels.get(idx).cloned(),
            });
        } else {
            tracing::warn!(
                requested = %field,
                label = ?labels.get(idx),
                "Requested phone field not found in CSV headers"
            );
        }
    }

    if !kept.is_empty() {
        return Ok(kept);
    }

    Ok(vec![PhoneColumn {
        field: resolve_field(columns, "", FieldKind::Phone, strategy)?,
        label: None,
    }])
}
