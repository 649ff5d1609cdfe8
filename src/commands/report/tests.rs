use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use clap::Parser;

use super::config::{command_line_lists, resolve_config};
use super::layout::{ReportParts, assemble_document};
use super::run::execute;
use crate::cli::{Cli, Commands, ReportArgs};
use crate::error::{EvalError, RenderError};
use crate::model::{AppConfig, InputOrigin, RankedLists, RelevantSet};
use crate::prompt::Prompter;
use crate::render::{Block, ReportTable};
use crate::source::ResolvedInput;

fn report_args(extra: &[&str]) -> ReportArgs {
    let mut argv = vec!["rankeval", "report"];
    argv.extend_from_slice(extra);
    match Cli::try_parse_from(argv).expect("valid report args").command {
        Commands::Report(args) => args,
        other => panic!("unexpected command: {other:?}"),
    }
}

fn config(output_dir: &Path) -> AppConfig {
    AppConfig {
        identifier: "Ada Lovelace".to_string(),
        roll_number: "S20210010123".to_string(),
        jar_path: PathBuf::from("InfoRetireval.jar"),
        java_bin: "java".to_string(),
        generator_class: "in.ac.iiits.ir.data.GenerateRankedList".to_string(),
        output_dir: output_dir.to_path_buf(),
        report_prefix: "IR-Report".to_string(),
        title: "Assignment - 2".to_string(),
        document: true,
        keep_images: false,
        manifest_path: None,
        use_generator: false,
    }
}

fn input(list1: &[u32], list2: &[u32], top_k: usize) -> ResolvedInput {
    ResolvedInput {
        lists: RankedLists {
            list1: RelevantSet::from_ranks(list1.iter().copied()).expect("valid ranks"),
            list2: RelevantSet::from_ranks(list2.iter().copied()).expect("valid ranks"),
            top_k,
            transcript: "List 1: [1, 2, 5]\nList 2: [2, 3]\nYour TopK = 5\n".to_string(),
        },
        origin: InputOrigin::Generator,
        fallback_reason: None,
    }
}

const IMAGE_NAMES: [&str; 4] = [
    "Precision-Recall_Curve_1.svg",
    "Precision-Recall_Curve_2.svg",
    "ROC_Curve_1.svg",
    "ROC_Curve_2.svg",
];

#[test]
fn execute_writes_document_and_removes_embedded_images() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut console = Vec::new();

    let manifest =
        execute(config(dir.path()), input(&[1, 2, 5], &[2, 3], 5), &mut console).expect("report");

    let document_path = dir.path().join("IR-Report-0123.html");
    let html = fs::read_to_string(&document_path).expect("document exists");
    assert_eq!(html.matches("<section class=\"page\">").count(), 6);
    assert_eq!(html.matches("<svg").count(), 4);
    assert!(html.contains("Name: Ada Lovelace"));
    assert!(html.contains("<br>Page 6</div>"));

    for name in IMAGE_NAMES {
        assert!(!dir.path().join(name).exists(), "{name} should be removed");
    }

    assert_eq!(manifest.artifacts.len(), 5);
    assert_eq!(
        manifest
            .artifacts
            .iter()
            .filter(|artifact| artifact.removed)
            .count(),
        4
    );
    assert_eq!(manifest.lists.len(), 2);
    assert_eq!(manifest.top_k, 5);

    let console = String::from_utf8(console).expect("utf8 console");
    assert!(console.contains("Your TopK = 5"));
    assert!(console.contains("1/1 = 1.00"));
    assert!(console.contains("3/5 = 0.60"));
    assert!(console.contains("Report saved as"));
    let tables_at = console.find("Precision and Recall Table for Ranked List - 2").expect("table");
    let roc_at = console
        .find("Receiver-Operating-Characteristic for Ranked List - 1")
        .expect("roc table");
    assert!(tables_at < roc_at);
}

#[test]
fn keep_images_leaves_curves_next_to_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = config(dir.path());
    config.keep_images = true;

    execute(config, input(&[1, 2, 5], &[2, 3], 5), &mut Vec::new()).expect("report");

    for name in IMAGE_NAMES {
        assert!(dir.path().join(name).exists(), "{name} should be kept");
    }
    assert!(dir.path().join("IR-Report-0123.html").exists());
}

#[test]
fn without_document_only_curves_are_written() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = config(dir.path());
    config.document = false;

    let manifest =
        execute(config, input(&[1, 2, 5], &[2, 3], 5), &mut Vec::new()).expect("report");

    assert_eq!(manifest.artifacts.len(), 4);
    for name in IMAGE_NAMES {
        assert!(dir.path().join(name).exists());
    }
    assert!(!dir.path().join("IR-Report-0123.html").exists());
}

#[test]
fn degenerate_list_fails_before_any_artifact_is_written() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output_dir = dir.path().join("out");

    let err = execute(config(&output_dir), input(&[1, 2, 5], &[1, 2, 3, 4, 5], 5), &mut Vec::new())
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<EvalError>(),
        Some(EvalError::InvalidInput(_))
    ));
    assert!(err.to_string().contains("ranked list 2"));
    assert!(!output_dir.exists());
}

#[test]
fn unwritable_image_surfaces_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("ROC_Curve_1.svg")).expect("blocking directory");

    let err = execute(config(dir.path()), input(&[1, 2, 5], &[2, 3], 5), &mut Vec::new())
        .unwrap_err();

    let render = err.downcast_ref::<RenderError>().expect("render error");
    let RenderError::Io { path, .. } = render;
    assert!(path.ends_with("ROC_Curve_1.svg"));
    assert!(!dir.path().join("IR-Report-0123.html").exists());
}

#[test]
fn manifest_records_origin_and_fallback_warning() {
    let dir = tempfile::tempdir().expect("tempdir");
    let manifest_path = dir.path().join("manifests").join("run.json");
    let mut config = config(dir.path());
    config.manifest_path = Some(manifest_path.clone());
    config.document = false;

    let mut resolved = input(&[1, 2, 5], &[2, 3], 5);
    resolved.origin = InputOrigin::Manual;
    resolved.fallback_reason = Some("ranking generator exited with exit status: 1".to_string());

    execute(config, resolved, &mut Vec::new()).expect("report");

    let raw = fs::read_to_string(&manifest_path).expect("manifest written");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("manifest json");
    assert_eq!(value["input_origin"], "manual");
    assert_eq!(value["lists"][0]["relevant"], serde_json::json!([1, 2, 5]));
    assert_eq!(value["artifacts"].as_array().map(Vec::len), Some(4));
    assert_eq!(value["warnings"].as_array().map(Vec::len), Some(1));
    assert_eq!(value["artifacts"][0]["sha256"].as_str().map(str::len), Some(64));
}

#[test]
fn resolve_config_prompts_for_missing_values() {
    let args = report_args(&[]);
    let mut prompter = Prompter::new(Cursor::new("Ada\nS20210010123\n\n"), Vec::new());

    let config = resolve_config(&args, &mut prompter).expect("config");
    assert_eq!(config.identifier, "Ada");
    assert_eq!(config.seed_digits(), "123");
    assert_eq!(config.jar_path, PathBuf::from("InfoRetireval.jar"));
    assert!(config.use_generator);
    assert!(config.document);

    let prompts = String::from_utf8(prompter.into_output()).expect("utf8 prompts");
    assert!(prompts.starts_with("Enter your name: Enter your roll number: "));
    assert!(prompts.contains("InfoRetireval.jar file"));
}

#[test]
fn resolve_config_skips_prompts_covered_by_flags() {
    let args = report_args(&[
        "--no-document",
        "--list1",
        "1,2",
        "--list2",
        "3",
        "--top-k",
        "6",
    ]);
    let mut prompter = Prompter::new(Cursor::new(""), Vec::new());

    let config = resolve_config(&args, &mut prompter).expect("config");
    assert!(!config.use_generator);
    assert!(!config.document);
    assert!(config.identifier.is_empty());
    assert!(prompter.into_output().is_empty());

    let lists = command_line_lists(&args)
        .expect("valid lists")
        .expect("lists given");
    assert_eq!(lists.list1.to_string(), "[1, 2]");
    assert_eq!(lists.top_k, 6);
}

#[test]
fn command_line_lists_absent_without_flags() {
    assert!(command_line_lists(&report_args(&[])).expect("no lists").is_none());
}

#[test]
fn document_layout_places_items_on_expected_pages() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image = dir.path().join("curve.svg");
    fs::write(&image, "<svg></svg>").expect("write svg");

    let table = ReportTable {
        title: "Table".to_string(),
        headers: vec!["Rank".to_string()],
        rows: vec![vec!["1".to_string()]],
    };
    let tables = vec![table.clone(), table];
    let images = vec![image.clone(), image];

    let document = assemble_document(
        &config(dir.path()),
        &ReportParts {
            pr_tables: &tables,
            roc_tables: &tables,
            pr_images: &images,
            roc_images: &images,
        },
    )
    .expect("document");

    assert_eq!(document.pages.len(), 6);
    assert_eq!(
        document.pages[0].blocks[0],
        Block::Heading("Assignment - 2".to_string())
    );
    assert!(matches!(document.pages[1].blocks[0], Block::Table(_)));
    assert!(matches!(document.pages[2].blocks[1], Block::Figure(_)));
    assert_eq!(document.pages[3].blocks.len(), 3);
    assert!(matches!(document.pages[5].blocks[1], Block::Caption(_)));
}
