use crate::error::EvalError;
use crate::model::{CurveKind, MetricRow, MetricSeries, RelevantSet, SeriesSummary};

/// Largest accepted cutoff. One row is materialized per rank.
pub const MAX_CUTOFF: usize = 1_000_000;

/// Computes hits, precision, recall, TPR and FPR at every rank from 1 to `k`.
///
/// Ranks in `relevant` beyond `k` are never counted as hits, and push FPR
/// above 1 at the deepest ranks since `k - |relevant|` undercounts negatives.
/// Fails when any denominator would be zero: an empty relevant set, `k == 0`,
/// or a relevant set that leaves no non-relevant position within the cutoff.
/// A cutoff above [`MAX_CUTOFF`] is rejected as well.
pub fn evaluate(relevant: &RelevantSet, k: usize) -> Result<MetricSeries, EvalError> {
    if k == 0 {
        return Err(EvalError::InvalidInput(
            "cutoff must be at least 1".to_string(),
        ));
    }
    if k > MAX_CUTOFF {
        return Err(EvalError::InvalidInput(format!(
            "cutoff {k} exceeds the maximum of {MAX_CUTOFF}"
        )));
    }

    if relevant.is_empty() {
        return Err(EvalError::InvalidInput(
            "relevant set is empty; recall is undefined".to_string(),
        ));
    }
    let relevant_total = relevant.len();
    if relevant_total >= k {
        return Err(EvalError::InvalidInput(format!(
            "cutoff {k} leaves no non-relevant positions for {relevant_total} relevant items; \
             false positive rate is undefined"
        )));
    }

    let non_relevant_total = k - relevant_total;
    let mut hits = 0_usize;
    let mut rows = Vec::with_capacity(k);

    for rank in 1..=k {
        let is_hit = relevant.contains(rank);
        if is_hit {
            hits += 1;
        }

        let recall = hits as f64 / relevant_total as f64;
        rows.push(MetricRow {
            rank,
            is_hit,
            cumulative_hits: hits,
            precision: hits as f64 / rank as f64,
            recall,
            tpr: recall,
            fpr: (rank - hits) as f64 / non_relevant_total as f64,
        });
    }

    Ok(MetricSeries {
        cutoff: k,
        relevant_total,
        non_relevant_total,
        rows,
    })
}

pub fn summarize(series: &MetricSeries) -> SeriesSummary {
    let last = series.rows.last();
    let precision_at_hits: f64 = series
        .rows
        .iter()
        .filter(|row| row.is_hit)
        .map(|row| row.precision)
        .sum();

    SeriesSummary {
        final_precision: last.map(|row| row.precision).unwrap_or(0.0),
        final_recall: last.map(|row| row.recall).unwrap_or(0.0),
        average_precision: if series.relevant_total == 0 {
            0.0
        } else {
            precision_at_hits / series.relevant_total as f64
        },
        roc_auc: trapezoid_area(&series.points(CurveKind::Roc)),
    }
}

// Area under the polyline starting at the origin.
fn trapezoid_area(points: &[(f64, f64)]) -> f64 {
    let mut area = 0.0;
    let mut previous = (0.0, 0.0);
    for &point in points {
        area += (point.0 - previous.0) * (point.1 + previous.1) / 2.0;
        previous = point;
    }
    area
}
