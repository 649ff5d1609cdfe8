use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// 1-based rank positions of the relevant items in one ranked list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelevantSet(BTreeSet<u32>);

impl RelevantSet {
    pub fn from_ranks<I>(ranks: I) -> Result<Self, EvalError>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut set = BTreeSet::new();
        for rank in ranks {
            if rank == 0 {
                return Err(EvalError::InvalidInput(
                    "rank positions are 1-based; got 0".to_string(),
                ));
            }
            set.insert(rank);
        }
        Ok(Self(set))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, rank: usize) -> bool {
        u32::try_from(rank)
            .map(|rank| self.0.contains(&rank))
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for RelevantSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranks = self.iter().map(|rank| rank.to_string()).collect::<Vec<_>>();
        write!(f, "[{}]", ranks.join(", "))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    PrecisionRecall,
    Roc,
}

impl CurveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrecisionRecall => "precision_recall",
            Self::Roc => "roc",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::PrecisionRecall => "Precision-Recall Curve",
            Self::Roc => "ROC Curve",
        }
    }

    pub fn image_file_name(self, list_number: usize) -> String {
        match self {
            Self::PrecisionRecall => format!("Precision-Recall_Curve_{list_number}.svg"),
            Self::Roc => format!("ROC_Curve_{list_number}.svg"),
        }
    }
}

/// Metrics at a single rank position.
///
/// `tpr` always carries the same value as `recall`: with one relevance class
/// both are hits over the number of relevant items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub rank: usize,
    pub is_hit: bool,
    pub cumulative_hits: usize,
    pub precision: f64,
    pub recall: f64,
    pub tpr: f64,
    pub fpr: f64,
}

impl MetricRow {
    pub fn false_positives(&self) -> usize {
        self.rank - self.cumulative_hits
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSeries {
    pub cutoff: usize,
    pub relevant_total: usize,
    pub non_relevant_total: usize,
    pub rows: Vec<MetricRow>,
}

impl MetricSeries {
    /// Curve points in plotting order: (recall, precision) or (fpr, tpr).
    pub fn points(&self, kind: CurveKind) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .map(|row| match kind {
                CurveKind::PrecisionRecall => (row.recall, row.precision),
                CurveKind::Roc => (row.fpr, row.tpr),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub final_precision: f64,
    pub final_recall: f64,
    pub average_precision: f64,
    pub roc_auc: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputOrigin {
    Generator,
    Manual,
    CommandLine,
}

impl InputOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generator => "generator",
            Self::Manual => "manual",
            Self::CommandLine => "command_line",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedLists {
    pub list1: RelevantSet,
    pub list2: RelevantSet,
    pub top_k: usize,
    /// Raw generator output; empty when the values were typed in.
    pub transcript: String,
}

/// Settings for one report run, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub identifier: String,
    pub roll_number: String,
    pub jar_path: PathBuf,
    pub java_bin: String,
    pub generator_class: String,
    pub output_dir: PathBuf,
    pub report_prefix: String,
    pub title: String,
    pub document: bool,
    pub keep_images: bool,
    pub manifest_path: Option<PathBuf>,
    pub use_generator: bool,
}

impl AppConfig {
    /// Seed handed to the ranking generator.
    pub fn seed_digits(&self) -> &str {
        tail_chars(self.roll_number.trim(), 3)
    }

    /// Suffix embedded in the document file name.
    pub fn file_suffix(&self) -> &str {
        tail_chars(self.roll_number.trim(), 4)
    }

    pub fn document_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}-{}.html", self.report_prefix, self.file_suffix()))
    }
}

fn tail_chars(value: &str, count: usize) -> &str {
    let start = value
        .char_indices()
        .rev()
        .nth(count.saturating_sub(1))
        .map(|(index, _)| index)
        .unwrap_or(0);
    &value[start..]
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactEntry {
    pub kind: String,
    pub list_number: Option<usize>,
    pub path: String,
    pub sha256: String,
    pub removed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListReport {
    pub list_number: usize,
    pub relevant: RelevantSet,
    pub summary: SeriesSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub identifier: String,
    pub roll_number: String,
    pub input_origin: InputOrigin,
    pub top_k: usize,
    pub lists: Vec<ListReport>,
    pub artifacts: Vec<ArtifactEntry>,
    pub warnings: Vec<String>,
}
