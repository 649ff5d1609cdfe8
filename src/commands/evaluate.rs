use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::EvaluateArgs;
use crate::metrics::{evaluate, summarize};
use crate::model::{CurveKind, MetricSeries, SeriesSummary};
use crate::render::{ReportTable, build_table};
use crate::source::cleanse_rank_list;

#[derive(Debug, Serialize)]
struct EvaluateResponse {
    curve: CurveKind,
    series: MetricSeries,
    summary: SeriesSummary,
    table: ReportTable,
}

pub fn run(args: EvaluateArgs) -> Result<()> {
    let relevant = cleanse_rank_list(&args.relevant).context("invalid --relevant list")?;
    let kind = CurveKind::from(args.curve);
    let series = evaluate(&relevant, args.top_k)
        .with_context(|| format!("failed to evaluate {relevant} at cutoff {}", args.top_k))?;
    let summary = summarize(&series);

    info!(
        curve = kind.as_str(),
        top_k = args.top_k,
        relevant = relevant.len(),
        average_precision = summary.average_precision,
        roc_auc = summary.roc_auc,
        "evaluation complete"
    );

    let table = build_table(&series, kind, 1);
    let mut output = io::BufWriter::new(io::stdout().lock());

    if args.json {
        let response = EvaluateResponse {
            curve: kind,
            series,
            summary,
            table,
        };
        serde_json::to_writer_pretty(&mut output, &response)
            .context("failed to serialize evaluation json output")?;
        writeln!(output)?;
    } else {
        write!(output, "{}", table.to_text())?;
        writeln!(
            output,
            "\tAverage precision: {:.4}  ROC AUC: {:.4}",
            summary.average_precision, summary.roc_auc
        )?;
    }

    output.flush()?;
    Ok(())
}
