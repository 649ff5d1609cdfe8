use std::path::PathBuf;

use anyhow::Result;

use crate::model::AppConfig;
use crate::render::{Block, ReportDocument, ReportTable, load_figure};

pub const ITEM_TABLES: &str =
    "a) Generate Two Ranked lists and compute Precision and Recall for both these lists.";
pub const ITEM_PR_CURVES: &str = "b) Draw the Precision-Recall curve for each ranked list.";
pub const ITEM_ROC_CURVES: &str =
    "c) Draw the Receiver-Operating-Characteristic for each ranked list.";

/// Tables and image paths for both lists, indexed by list number - 1.
pub struct ReportParts<'a> {
    pub pr_tables: &'a [ReportTable],
    pub roc_tables: &'a [ReportTable],
    pub pr_images: &'a [PathBuf],
    pub roc_images: &'a [PathBuf],
}

/// Lays out the report: one page per precision-recall table, a page of
/// precision-recall curves, a page of ROC curves, then one page per ROC table.
pub fn assemble_document(config: &AppConfig, parts: &ReportParts<'_>) -> Result<ReportDocument> {
    let mut document = ReportDocument::new(
        config.title.clone(),
        config.identifier.clone(),
        config.roll_number.clone(),
    );

    for (index, table) in parts.pr_tables.iter().enumerate() {
        let page = document.new_page();
        if index == 0 {
            page.push(Block::Heading(config.title.clone()))
                .push(Block::Paragraph(ITEM_TABLES.to_string()));
        }
        page.push(Block::Table(table.clone()))
            .push(Block::Caption(table.title.clone()));
    }

    let page = document.new_page();
    page.push(Block::Paragraph(ITEM_PR_CURVES.to_string()));
    for image in parts.pr_images {
        page.push(load_figure(image)?);
    }

    let page = document.new_page();
    page.push(Block::Paragraph(ITEM_ROC_CURVES.to_string()));
    for image in parts.roc_images {
        page.push(load_figure(image)?);
    }

    for table in parts.roc_tables {
        document
            .new_page()
            .push(Block::Table(table.clone()))
            .push(Block::Caption(table.title.clone()));
    }

    Ok(document)
}
