//! Log-scaled cumulative distribution curves.
//!
//! Given all trade volumes for a scope, compute how much of the total volume
//! (CVF) or total trade count (CDF) sits below each log10(volume) threshold,
//! downsampled to a fixed number of equal-frequency bins.

use serde::Serialize;

use crate::db::trades::TradeRow;

/// Maximum (and default) number of percentile bins per curve.
pub const DEFAULT_BINS: usize = 2500;

/// Which running cumulative a curve tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    /// Running sum of trade volume (CVF).
    Volume,
    /// Running count of trades (CDF).
    TradeCount,
}

/// One sampled point on a cumulative curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub log_volume: f64,
    pub cumulative_percent: f64,
}

/// A scope label plus its sampled curve, ordered by `log_volume` ascending.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionCurve {
    pub scope: String,
    pub points: Vec<CurvePoint>,
}

/// Compute a downsampled cumulative distribution curve for one scope.
///
/// Trades with non-positive or non-finite volume are excluded (log10 is
/// undefined for them). The remaining rows are sorted by volume ascending,
/// ties broken by trade id so reruns on the same data are bit-identical.
/// The running cumulative is normalised by its final total, then the rows
/// are partitioned into `min(bins, rows)` equal-frequency bins; each bin is
/// represented by its last row in volume order (its maximum `log_volume`).
///
/// Returns an empty vec when no rows qualify.
pub fn compute_curve(trades: &[TradeRow], measure: Measure, bins: usize) -> Vec<CurvePoint> {
    let mut rows: Vec<TradeRow> = trades
        .iter()
        .copied()
        .filter(|t| t.volume.is_finite() && t.volume > 0.0)
        .collect();
    if rows.is_empty() || bins == 0 {
        return Vec::new();
    }

    rows.sort_by(|a, b| {
        a.volume
            .total_cmp(&b.volume)
            .then(a.trade_id.cmp(&b.trade_id))
    });

    let n = rows.len();
    let total: f64 = match measure {
        Measure::Volume => rows.iter().map(|t| t.volume).sum(),
        Measure::TradeCount => n as f64,
    };

    // Running cumulative in sorted order, normalised by the final total.
    let mut percents = Vec::with_capacity(n);
    let mut running = 0.0_f64;
    for (i, trade) in rows.iter().enumerate() {
        match measure {
            Measure::Volume => running += trade.volume,
            Measure::TradeCount => running = (i + 1) as f64,
        }
        percents.push(running / total);
    }

    // Equal-frequency (N-tile) partition: with `n` rows and `bins` groups,
    // the first `n % bins` groups take one extra row. The representative of
    // a group is its last row, i.e. the maximum log_volume in the group.
    let bins = bins.min(n);
    let base = n / bins;
    let extra = n % bins;

    let mut points = Vec::with_capacity(bins);
    let mut end = 0_usize;
    for bin in 0..bins {
        end += base + usize::from(bin < extra);
        let last = end - 1;
        points.push(CurvePoint {
            log_volume: rows[last].volume.log10(),
            cumulative_percent: percents[last],
        });
    }
    points
}

/// Both curves for one scope, already restricted to displayable points
/// (`log_volume > 0` — the dashboard only charts volumes above 1).
pub fn curves_for_scope(
    label: &str,
    trades: &[TradeRow],
    bins: usize,
) -> (DistributionCurve, DistributionCurve) {
    let cvf = DistributionCurve {
        scope: label.to_string(),
        points: displayable(compute_curve(trades, Measure::Volume, bins)),
    };
    let cdf = DistributionCurve {
        scope: label.to_string(),
        points: displayable(compute_curve(trades, Measure::TradeCount, bins)),
    };
    (cvf, cdf)
}

fn displayable(mut points: Vec<CurvePoint>) -> Vec<CurvePoint> {
    points.retain(|p| p.log_volume > 0.0 && p.cumulative_percent.is_finite());
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trades(volumes: &[f64]) -> Vec<TradeRow> {
        volumes
            .iter()
            .enumerate()
            .map(|(i, &volume)| TradeRow {
                trade_id: i as i64 + 1,
                volume,
            })
            .collect()
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn four_decades_trade_count_curve() {
        let rows = trades(&[1.0, 10.0, 100.0, 1000.0]);
        let points = compute_curve(&rows, Measure::TradeCount, DEFAULT_BINS);

        assert_eq!(points.len(), 4);
        for (i, expected_log) in [0.0, 1.0, 2.0, 3.0].iter().enumerate() {
            assert_close(points[i].log_volume, *expected_log);
            assert_close(points[i].cumulative_percent, (i + 1) as f64 * 0.25);
        }
    }

    #[test]
    fn single_trade() {
        let rows = trades(&[50.0]);
        let points = compute_curve(&rows, Measure::Volume, DEFAULT_BINS);

        assert_eq!(points.len(), 1);
        assert_close(points[0].log_volume, 50.0_f64.log10());
        assert_close(points[0].cumulative_percent, 1.0);
    }

    #[test]
    fn zero_volume_excluded() {
        let rows = trades(&[0.0, 10.0, 100.0]);
        let points = compute_curve(&rows, Measure::TradeCount, DEFAULT_BINS);

        assert_eq!(points.len(), 2);
        assert_close(points[0].log_volume, 1.0);
        assert_close(points[0].cumulative_percent, 0.5);
        assert_close(points[1].cumulative_percent, 1.0);
    }

    #[test]
    fn negative_and_nan_volumes_excluded() {
        let rows = trades(&[-5.0, f64::NAN, 10.0]);
        let points = compute_curve(&rows, Measure::Volume, DEFAULT_BINS);
        assert_eq!(points.len(), 1);
        assert_close(points[0].cumulative_percent, 1.0);
    }

    #[test]
    fn empty_scope_yields_empty_curve() {
        assert!(compute_curve(&[], Measure::Volume, DEFAULT_BINS).is_empty());
        assert!(compute_curve(&trades(&[0.0]), Measure::TradeCount, DEFAULT_BINS).is_empty());
    }

    #[test]
    fn monotone_and_ends_at_one() {
        let volumes: Vec<f64> = (1..=10_000).map(|i| (i as f64).sqrt() * 3.7).collect();
        let rows = trades(&volumes);

        for measure in [Measure::Volume, Measure::TradeCount] {
            let points = compute_curve(&rows, measure, DEFAULT_BINS);
            assert_eq!(points.len(), DEFAULT_BINS);
            for pair in points.windows(2) {
                assert!(pair[0].cumulative_percent <= pair[1].cumulative_percent);
                assert!(pair[0].log_volume <= pair[1].log_volume);
            }
            assert_close(points.last().unwrap().cumulative_percent, 1.0);
        }
    }

    #[test]
    fn point_count_is_min_of_bins_and_rows() {
        let rows = trades(&(1..=100).map(|i| i as f64).collect::<Vec<_>>());
        assert_eq!(compute_curve(&rows, Measure::Volume, 2500).len(), 100);
        assert_eq!(compute_curve(&rows, Measure::Volume, 100).len(), 100);
        assert_eq!(compute_curve(&rows, Measure::Volume, 7).len(), 7);
        assert_eq!(compute_curve(&rows, Measure::Volume, 1).len(), 1);
    }

    #[test]
    fn uneven_partition_front_loads_extra_rows() {
        // 5 rows into 3 bins: sizes 2, 2, 1 → representatives at rows 2, 4, 5.
        let rows = trades(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let points = compute_curve(&rows, Measure::TradeCount, 3);

        assert_eq!(points.len(), 3);
        assert_close(points[0].log_volume, 2.0_f64.log10());
        assert_close(points[0].cumulative_percent, 0.4);
        assert_close(points[1].log_volume, 4.0_f64.log10());
        assert_close(points[1].cumulative_percent, 0.8);
        assert_close(points[2].log_volume, 5.0_f64.log10());
        assert_close(points[2].cumulative_percent, 1.0);
    }

    #[test]
    fn rerun_is_bit_identical() {
        let volumes: Vec<f64> = (0..5_000).map(|i| ((i * 7919) % 1000) as f64 + 0.5).collect();
        let rows = trades(&volumes);

        let a = compute_curve(&rows, Measure::Volume, DEFAULT_BINS);
        let b = compute_curve(&rows, Measure::Volume, DEFAULT_BINS);
        assert_eq!(a, b);
    }

    #[test]
    fn equal_volumes_tie_break_by_trade_id() {
        // Same volume everywhere: order (and therefore each bin's percent)
        // must come from trade ids, not input order.
        let mut rows = trades(&[7.0, 7.0, 7.0, 7.0]);
        let forward = compute_curve(&rows, Measure::TradeCount, DEFAULT_BINS);
        rows.reverse();
        let reversed = compute_curve(&rows, Measure::TradeCount, DEFAULT_BINS);

        assert_eq!(forward, reversed);
        assert_eq!(forward.len(), 4);
        assert_close(forward[0].cumulative_percent, 0.25);
        assert_close(forward[3].cumulative_percent, 1.0);
    }

    #[test]
    fn total_equals_union_of_per_asset_rows() {
        let btc = trades(&[5.0, 50.0, 500.0]);
        let eth: Vec<TradeRow> = [2.0, 20.0]
            .iter()
            .enumerate()
            .map(|(i, &volume)| TradeRow {
                trade_id: 100 + i as i64,
                volume,
            })
            .collect();

        let mut union = btc.clone();
        union.extend_from_slice(&eth);

        let direct = compute_curve(&union, Measure::Volume, DEFAULT_BINS);
        let mut shuffled = union.clone();
        shuffled.reverse();
        let from_shuffled = compute_curve(&shuffled, Measure::Volume, DEFAULT_BINS);
        assert_eq!(direct, from_shuffled);
        assert_eq!(direct.len(), 5);
    }

    #[test]
    fn display_filter_drops_sub_unit_volumes() {
        let rows = trades(&[0.5, 1.0, 10.0]);
        let (cvf, cdf) = curves_for_scope("BTC", &rows, DEFAULT_BINS);

        // 0.5 and 1.0 participate in the cumulative totals but chart only
        // shows log_volume > 0.
        assert_eq!(cvf.points.len(), 1);
        assert_close(cvf.points[0].log_volume, 1.0);
        assert_close(cvf.points[0].cumulative_percent, 1.0);

        assert_eq!(cdf.points.len(), 1);
        assert_close(cdf.points[0].cumulative_percent, 1.0);
    }
}
