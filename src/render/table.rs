use serde::Serialize;

use crate::model::{CurveKind, MetricSeries};

/// A format-agnostic table: header cells plus one row of cells per rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn build_table(series: &MetricSeries, kind: CurveKind, list_number: usize) -> ReportTable {
    match kind {
        CurveKind::PrecisionRecall => precision_recall_table(series, list_number),
        CurveKind::Roc => roc_table(series, list_number),
    }
}

fn precision_recall_table(series: &MetricSeries, list_number: usize) -> ReportTable {
    let rows = series
        .rows
        .iter()
        .map(|row| {
            vec![
                row.rank.to_string(),
                if row.is_hit { "Relevant" } else { "Not Relevant" }.to_string(),
                format!(
                    "{}/{} = {:.2}",
                    row.cumulative_hits, row.rank, row.precision
                ),
                format!(
                    "{}/{} = {:.2}",
                    row.cumulative_hits, series.relevant_total, row.recall
                ),
            ]
        })
        .collect();

    ReportTable {
        title: format!("Precision and Recall Table for Ranked List - {list_number}"),
        headers: headers(&["Retrieved", "Relevance", "Precision", "Recall"]),
        rows,
    }
}

fn roc_table(series: &MetricSeries, list_number: usize) -> ReportTable {
    let rows = series
        .rows
        .iter()
        .map(|row| {
            vec![
                row.rank.to_string(),
                format!(
                    "{}/{} = {:.2}",
                    row.cumulative_hits, series.relevant_total, row.tpr
                ),
                format!(
                    "{}/{} = {:.2}",
                    row.false_positives(),
                    series.non_relevant_total,
                    row.fpr
                ),
            ]
        })
        .collect();

    ReportTable {
        title: format!("Receiver-Operating-Characteristic for Ranked List - {list_number}"),
        headers: headers(&[
            "Rank",
            "True Positive Rate (TPR)",
            "False Positive Rate (FPR)",
        ]),
        rows,
    }
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl ReportTable {
    /// Fixed-width text layout, tab-indented, one line per row.
    pub fn to_text(&self) -> String {
        let widths = self.column_widths();
        let header = format_line(&self.headers, &widths);
        let separator = format!("\t{}", "-".repeat(header.chars().count() - 1));

        let mut lines = Vec::with_capacity(self.rows.len() + 4);
        lines.push(separator.clone());
        lines.push(header);
        lines.push(separator.clone());
        for row in &self.rows {
            lines.push(format_line(row, &widths));
        }
        lines.push(separator);

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|cell| cell.chars().count())
            .collect();
        for row in &self.rows {
            for (index, cell) in row.iter().enumerate() {
                let width = cell.chars().count();
                match widths.get_mut(index) {
                    Some(current) => *current = (*current).max(width),
                    None => widths.push(width),
                }
            }
        }
        widths
    }
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let body = widths
        .iter()
        .enumerate()
        .map(|(index, width)| {
            let cell = cells.get(index).map(String::as_str).unwrap_or("");
            format!(" {cell:^width$} ")
        })
        .collect::<Vec<_>>()
        .join("|");
    format!("\t|{body}|")
}
