use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::db::trades::{self, Scope, TOTAL_LABEL};
use crate::distribution::{curves_for_scope, DistributionCurve, DEFAULT_BINS};
use crate::error::HubError;
use crate::state::AppState;

// ── Query params ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CurvesQuery {
    /// Comma-separated scope labels, e.g. `BTC,ETH,Total`.
    #[serde(default)]
    scopes: String,
    /// Optional bin-count override.
    #[serde(default)]
    bins: Option<usize>,
}

// ── Route definitions ────────────────────────────────────────────────────

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/assets", get(api_assets))
        .route("/api/curves", get(api_curves))
}

// ── Handlers ─────────────────────────────────────────────────────────────

/// All selectable scopes plus the default selection (top-k by trade count,
/// with the `Total` aggregate appended to both).
async fn api_assets(State(state): State<Arc<AppState>>) -> Result<Json<Value>, HubError> {
    let conn = state.pool.get()?;

    let mut assets = trades::list_distinct_assets(&conn)?;
    let mut default_selection =
        trades::top_assets_by_trade_count(&conn, state.config.top_k as u32)?;
    assets.push(TOTAL_LABEL.to_string());
    default_selection.push(TOTAL_LABEL.to_string());

    Ok(Json(json!({
        "assets": assets,
        "default_selection": default_selection,
    })))
}

/// CVF and CDF curves for each requested scope.
///
/// Scopes are queried sequentially on one pooled connection. Scopes with no
/// qualifying trades (including unknown asset names) are reported under
/// `skipped` instead of failing the whole response; query errors surface
/// as HTTP 500.
async fn api_curves(
    State(state): State<Arc<AppState>>,
    Query(q): Query<CurvesQuery>,
) -> Result<Json<Value>, HubError> {
    let bins = q.bins.unwrap_or(state.config.bins).clamp(1, DEFAULT_BINS);
    let scopes = parse_scopes(&q.scopes);
    let conn = state.pool.get()?;

    let mut out: Vec<Value> = Vec::new();
    let mut skipped: Vec<String> = Vec::new();

    for scope in &scopes {
        let rows = trades::trades_for_scope(&conn, scope)?;
        let (cvf, cdf) = curves_for_scope(scope.label(), &rows, bins);

        if cvf.points.is_empty() && cdf.points.is_empty() {
            tracing::debug!("scope {} has no chartable trades, skipping", scope.label());
            skipped.push(scope.label().to_string());
            continue;
        }

        out.push(curve_pair_json(&cvf, &cdf));
    }

    Ok(Json(json!({
        "bins": bins,
        "scopes": out,
        "skipped": skipped,
    })))
}

fn curve_pair_json(cvf: &DistributionCurve, cdf: &DistributionCurve) -> Value {
    json!({
        "scope": cvf.scope,
        "cvf": cvf.points,
        "cdf": cdf.points,
    })
}

/// Split a comma-separated scope list, dropping blanks and duplicates while
/// preserving the requested order.
pub fn parse_scopes(raw: &str) -> Vec<Scope> {
    let mut scopes: Vec<Scope> = Vec::new();
    for part in raw.split(',') {
        if let Some(scope) = Scope::parse(part) {
            if !scopes.contains(&scope) {
                scopes.push(scope);
            }
        }
    }
    scopes
}
