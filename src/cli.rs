use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::CurveKind;
use crate::source::{DEFAULT_GENERATOR_CLASS, DEFAULT_JAR_PATH};

#[derive(Parser, Debug)]
#[command(
    name = "rankeval",
    version,
    about = "Precision-recall and ROC evaluation of ranked result lists"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate two generated ranked lists and write tables, curves and a report.
    Report(ReportArgs),
    /// Evaluate a single relevant list without prompts.
    Evaluate(EvaluateArgs),
    /// Parse ranking generator output and print the extracted values.
    Parse(ParseArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Name printed in the report header; prompted for when omitted.
    #[arg(long)]
    pub name: Option<String>,

    /// Roll number; its last three characters seed the generator.
    #[arg(long)]
    pub roll_number: Option<String>,

    /// Ranking generator jar; prompted for when omitted.
    #[arg(long, env = "RANKEVAL_JAR")]
    pub jar_path: Option<PathBuf>,

    #[arg(long, env = "RANKEVAL_JAVA", default_value = "java")]
    pub java_bin: String,

    #[arg(long, default_value = DEFAULT_GENERATOR_CLASS)]
    pub generator_class: String,

    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    #[arg(long, default_value = "IR-Report")]
    pub report_prefix: String,

    #[arg(long, default_value = "Ranked List Evaluation")]
    pub title: String,

    /// Only print tables and write curve images.
    #[arg(long, default_value_t = false)]
    pub no_document: bool,

    /// Keep the curve images after embedding them in the document.
    #[arg(long, default_value_t = false)]
    pub keep_images: bool,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    /// Skip the ranking generator and enter the lists by hand.
    #[arg(long, default_value_t = false)]
    pub no_generator: bool,

    #[arg(long, requires_all = ["list2", "top_k"])]
    pub list1: Option<String>,

    #[arg(long, requires_all = ["list1", "top_k"])]
    pub list2: Option<String>,

    #[arg(long, requires_all = ["list1", "list2"])]
    pub top_k: Option<usize>,
}

impl ReportArgs {
    pub fn default_jar_path() -> PathBuf {
        PathBuf::from(DEFAULT_JAR_PATH)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CurveArg {
    Pr,
    Roc,
}

impl From<CurveArg> for CurveKind {
    fn from(value: CurveArg) -> Self {
        match value {
            CurveArg::Pr => CurveKind::PrecisionRecall,
            CurveArg::Roc => CurveKind::Roc,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// Comma-separated 1-based ranks of the relevant items.
    #[arg(long)]
    pub relevant: String,

    #[arg(long)]
    pub top_k: usize,

    #[arg(long, value_enum, default_value_t = CurveArg::Pr)]
    pub curve: CurveArg,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    /// Transcript file, or `-` for stdin.
    #[arg(default_value = "-")]
    pub input: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn report_lists_require_each_other() {
        let parsed = Cli::try_parse_from(["rankeval", "report", "--list1", "1,2"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from([
            "rankeval", "report", "--list1", "1,2", "--list2", "3", "--top-k", "6",
        ])
        .expect("valid report args");
        let Commands::Report(args) = parsed.command else {
            panic!("expected report command");
        };
        assert_eq!(args.top_k, Some(6));
        assert!(!args.keep_images);
        assert_eq!(args.report_prefix, "IR-Report");
    }

    #[test]
    fn evaluate_defaults_to_precision_recall() {
        let parsed =
            Cli::try_parse_from(["rankeval", "evaluate", "--relevant", "1,2,5", "--top-k", "5"])
                .expect("valid evaluate args");
        let Commands::Evaluate(args) = parsed.command else {
            panic!("expected evaluate command");
        };
        assert_eq!(CurveKind::from(args.curve), CurveKind::PrecisionRecall);
    }
}
