use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use super::config::{command_line_lists, resolve_config};
use super::layout::{ITEM_PR_CURVES, ITEM_ROC_CURVES, ITEM_TABLES, ReportParts, assemble_document};
use crate::cli::ReportArgs;
use crate::metrics::{evaluate, summarize};
use crate::model::{
    AppConfig, ArtifactEntry, CurveKind, InputOrigin, ListReport, MetricSeries, RelevantSet,
    ReportManifest,
};
use crate::prompt::Prompter;
use crate::render::{ReportTable, build_table, write_curve, write_document};
use crate::source::{JarRankingSource, ResolvedInput, resolve_input};
use crate::util::{ensure_directory, now_utc_string, remove_artifact, sha256_file, write_json_pretty};

const MANIFEST_VERSION: u32 = 1;

pub fn run(args: ReportArgs) -> Result<()> {
    let mut prompter = Prompter::stdio();
    let config = resolve_config(&args, &mut prompter)?;

    let input = match command_line_lists(&args)? {
        Some(lists) => ResolvedInput {
            lists,
            origin: InputOrigin::CommandLine,
            fallback_reason: None,
        },
        None => {
            let source = config.use_generator.then(|| {
                JarRankingSource::new(
                    config.java_bin.clone(),
                    config.jar_path.clone(),
                    config.generator_class.clone(),
                )
            });
            resolve_input(source.as_ref(), config.seed_digits(), &mut prompter)?
        }
    };

    let mut output = io::BufWriter::new(io::stdout().lock());
    let manifest = execute(config, input, &mut output)?;
    output.flush()?;

    info!(
        origin = manifest.input_origin.as_str(),
        artifacts = manifest.artifacts.len(),
        "report completed"
    );
    Ok(())
}

/// Runs the evaluation for both lists and emits every report output.
///
/// All tables are written to `output` before any file is created, so a
/// degenerate input fails without leaving partial artifacts behind.
pub fn execute<W: Write>(
    config: AppConfig,
    input: ResolvedInput,
    output: &mut W,
) -> Result<ReportManifest> {
    let lists = &input.lists;
    let relevant_sets = [&lists.list1, &lists.list2];

    let pr_series = evaluate_lists(&relevant_sets, lists.top_k)?;
    let roc_series = evaluate_lists(&relevant_sets, lists.top_k)?;
    let pr_tables = build_tables(&pr_series, CurveKind::PrecisionRecall);
    let roc_tables = build_tables(&roc_series, CurveKind::Roc);

    write_console_report(output, &lists.transcript, &pr_tables, &roc_tables)?;

    ensure_directory(&config.output_dir)?;
    let mut artifacts = Vec::new();
    let pr_images = write_curves(
        &config.output_dir,
        &pr_series,
        CurveKind::PrecisionRecall,
        &mut artifacts,
    )?;
    let roc_images = write_curves(&config.output_dir, &roc_series, CurveKind::Roc, &mut artifacts)?;

    let mut document_path = None;
    if config.document {
        let document = assemble_document(
            &config,
            &ReportParts {
                pr_tables: &pr_tables,
                roc_tables: &roc_tables,
                pr_images: &pr_images,
                roc_images: &roc_images,
            },
        )?;
        let path = config.document_path();
        write_document(&path, &document)?;
        info!(path = %path.display(), pages = document.pages.len(), "wrote report document");

        artifacts.push(ArtifactEntry {
            kind: "document".to_string(),
            list_number: None,
            path: path.display().to_string(),
            sha256: sha256_file(&path)?,
            removed: false,
        });
        document_path = Some(path);

        if !config.keep_images {
            for artifact in artifacts.iter_mut().filter(|entry| entry.kind != "document") {
                remove_artifact(Path::new(&artifact.path))?;
                artifact.removed = true;
            }
        }
    }

    writeln!(output)?;
    writeln!(output, "{ITEM_PR_CURVES}")?;
    write_saved_paths(output, &artifacts, CurveKind::PrecisionRecall)?;
    writeln!(output, "{ITEM_ROC_CURVES}")?;
    write_saved_paths(output, &artifacts, CurveKind::Roc)?;
    if let Some(path) = &document_path {
        writeln!(output)?;
        writeln!(output, "Report saved as '{}'.", path.display())?;
    }

    let list_reports = relevant_sets
        .iter()
        .zip(&pr_series)
        .enumerate()
        .map(|(index, (relevant, series))| {
            let summary = summarize(series);
            info!(
                list = index + 1,
                average_precision = summary.average_precision,
                roc_auc = summary.roc_auc,
                final_precision = summary.final_precision,
                "ranked list evaluated"
            );
            ListReport {
                list_number: index + 1,
                relevant: (*relevant).clone(),
                summary,
            }
        })
        .collect();

    let manifest = ReportManifest {
        manifest_version: MANIFEST_VERSION,
        generated_at: now_utc_string(),
        identifier: config.identifier.clone(),
        roll_number: config.roll_number.clone(),
        input_origin: input.origin,
        top_k: lists.top_k,
        lists: list_reports,
        artifacts,
        warnings: input.fallback_reason.into_iter().collect(),
    };

    if let Some(path) = &config.manifest_path {
        write_json_pretty(path, &manifest)?;
        info!(path = %path.display(), "wrote run manifest");
    }

    Ok(manifest)
}

fn evaluate_lists(relevant_sets: &[&RelevantSet], top_k: usize) -> Result<Vec<MetricSeries>> {
    relevant_sets
        .iter()
        .enumerate()
        .map(|(index, relevant)| {
            evaluate(relevant, top_k).with_context(|| {
                format!(
                    "failed to evaluate ranked list {} {relevant} at TopK {top_k}",
                    index + 1
                )
            })
        })
        .collect()
}

fn build_tables(series: &[MetricSeries], kind: CurveKind) -> Vec<ReportTable> {
    series
        .iter()
        .enumerate()
        .map(|(index, series)| build_table(series, kind, index + 1))
        .collect()
}

fn write_console_report<W: Write>(
    output: &mut W,
    transcript: &str,
    pr_tables: &[ReportTable],
    roc_tables: &[ReportTable],
) -> Result<()> {
    if !transcript.trim().is_empty() {
        writeln!(output)?;
        writeln!(output, "{}", transcript.trim_end())?;
    }

    writeln!(output)?;
    writeln!(output, "{ITEM_TABLES}")?;
    for table in pr_tables {
        writeln!(output)?;
        writeln!(output, "\t{}:", table.title)?;
        write!(output, "{}", table.to_text())?;
    }

    writeln!(output)?;
    writeln!(output, "{ITEM_ROC_CURVES}")?;
    for table in roc_tables {
        writeln!(output)?;
        writeln!(output, "\t{}:", table.title)?;
        write!(output, "{}", table.to_text())?;
    }

    output.flush().context("failed to flush console report")?;
    Ok(())
}

fn write_curves(
    output_dir: &Path,
    series: &[MetricSeries],
    kind: CurveKind,
    artifacts: &mut Vec<ArtifactEntry>,
) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(series.len());
    for (index, series) in series.iter().enumerate() {
        let list_number = index + 1;
        let path = output_dir.join(kind.image_file_name(list_number));
        write_curve(&path, series, kind, list_number)?;
        info!(path = %path.display(), curve = kind.as_str(), "wrote curve image");

        artifacts.push(ArtifactEntry {
            kind: kind.as_str().to_string(),
            list_number: Some(list_number),
            path: path.display().to_string(),
            sha256: sha256_file(&path)?,
            removed: false,
        });
        paths.push(path);
    }
    Ok(paths)
}

fn write_saved_paths<W: Write>(
    output: &mut W,
    artifacts: &[ArtifactEntry],
    kind: CurveKind,
) -> Result<()> {
    for artifact in artifacts.iter().filter(|entry| entry.kind == kind.as_str()) {
        if artifact.removed {
            writeln!(output, "\t{} embedded in the report.", artifact.path)?;
        } else {
            writeln!(output, "\t{} saved as '{}'.", kind.display_name(), artifact.path)?;
        }
    }
    Ok(())
}
