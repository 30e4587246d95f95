use rusqlite::{params, Connection};

use crate::error::HubError;

// ── Types ────────────────────────────────────────────────────────────────

/// One trade row as consumed by the distribution calculator.
///
/// `volume` may be NaN when the stored value could not be read as a number;
/// the calculator drops such rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeRow {
    pub trade_id: i64,
    pub volume: f64,
}

/// Wire label of the synthetic all-assets aggregate.
pub const TOTAL_LABEL: &str = "Total";

/// A curve scope: one asset, or the synthetic aggregate across all assets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Asset(String),
    Total,
}

impl Scope {
    /// Parse a scope label as received from the dashboard. Blank ⇒ `None`.
    pub fn parse(label: &str) -> Option<Scope> {
        let label = label.trim();
        if label.is_empty() {
            None
        } else if label == TOTAL_LABEL {
            Some(Scope::Total)
        } else {
            Some(Scope::Asset(label.to_string()))
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Scope::Asset(asset) => asset,
            Scope::Total => TOTAL_LABEL,
        }
    }
}

// ── Queries ──────────────────────────────────────────────────────────────

/// Sorted distinct assets present in the trades table.
pub fn list_distinct_assets(conn: &Connection) -> Result<Vec<String>, HubError> {
    let mut stmt = conn.prepare("SELECT DISTINCT asset FROM trades ORDER BY asset ASC")?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Top `k` assets by trade count, busiest first. Equal counts are ordered
/// by asset name so the default selection is stable across requests.
pub fn top_assets_by_trade_count(conn: &Connection, k: u32) -> Result<Vec<String>, HubError> {
    let mut stmt = conn.prepare(
        "SELECT asset FROM trades
         GROUP BY asset
         ORDER BY COUNT(trade_id) DESC, asset ASC
         LIMIT ?",
    )?;
    let rows = stmt
        .query_map(params![k], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Fetch `(trade_id, volume)` rows for a scope.
///
/// No ordering contract: the calculator sorts by volume itself. Volumes
/// that cannot be read as REAL come back as NaN and are excluded downstream.
pub fn trades_for_scope(conn: &Connection, scope: &Scope) -> Result<Vec<TradeRow>, HubError> {
    let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<TradeRow> {
        Ok(TradeRow {
            trade_id: row.get(0)?,
            volume: row.get::<_, f64>(1).unwrap_or(f64::NAN),
        })
    };

    let rows = match scope {
        Scope::Total => {
            let mut stmt = conn.prepare("SELECT trade_id, volume FROM trades")?;
            let rows = stmt
                .query_map([], map_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        }
        Scope::Asset(asset) => {
            let mut stmt =
                conn.prepare("SELECT trade_id, volume FROM trades WHERE asset = ?")?;
            let rows = stmt
                .query_map(params![asset], map_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        }
    };
    Ok(rows)
}
