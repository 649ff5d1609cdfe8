use std::fs;
use std::path::Path;

use super::plot::escape_xml;
use super::table::ReportTable;
use crate::error::RenderError;

const STYLE: &str = r#"
body { font-family: Helvetica, Arial, sans-serif; margin: 0; background: #f0f0f0; }
.page { position: relative; width: 8.5in; min-height: 11in; margin: 0.25in auto; padding: 1in 1in 0.75in; box-sizing: border-box; background: white; page-break-after: always; break-after: page; }
.page:last-child { page-break-after: auto; break-after: auto; }
.page-header { position: absolute; top: 0.35in; right: 0.6in; font-size: 10pt; line-height: 1.4; }
h1 { font-size: 18pt; margin: 0 0 12pt; }
p { font-size: 11pt; margin: 0 0 12pt; }
p.caption { text-align: center; }
table { border-collapse: collapse; margin: 12pt auto; }
th, td { border: 1px solid grey; padding: 6px; text-align: center; }
th { background: darkblue; color: whitesmoke; font-weight: bold; font-size: 12pt; padding-bottom: 12px; border-bottom: 0.5px solid black; }
td { background: whitesmoke; color: black; font-size: 10pt; }
.figure { text-align: center; margin: 12pt 0; }
.figure svg { width: 6in; height: 4in; }
@media print { body { background: white; } .page { margin: 0; } }
"#;

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(String),
    Paragraph(String),
    Caption(String),
    Table(ReportTable),
    /// Inline SVG markup.
    Figure(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }
}

/// A paginated report. Every page repeats the name, roll number and page
/// number in its header.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub identifier: String,
    pub roll_number: String,
    pub pages: Vec<Page>,
}

impl ReportDocument {
    pub fn new(
        title: impl Into<String>,
        identifier: impl Into<String>,
        roll_number: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            identifier: identifier.into(),
            roll_number: roll_number.into(),
            pages: Vec::new(),
        }
    }

    pub fn new_page(&mut self) -> &mut Page {
        self.pages.push(Page::default());
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_xml(&self.title)));
        html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));

        for (index, page) in self.pages.iter().enumerate() {
            html.push_str(&format!(
                "<section class=\"page\">\n<div class=\"page-header\">Name: {}<br>Roll Number: {}<br>Page {}</div>\n",
                escape_xml(&self.identifier),
                escape_xml(&self.roll_number),
                index + 1
            ));
            for block in &page.blocks {
                render_block(&mut html, block);
            }
            html.push_str("</section>\n");
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

fn render_block(html: &mut String, block: &Block) {
    match block {
        Block::Heading(text) => html.push_str(&format!("<h1>{}</h1>\n", escape_xml(text))),
        Block::Paragraph(text) => html.push_str(&format!("<p>{}</p>\n", escape_xml(text))),
        Block::Caption(text) => {
            html.push_str(&format!("<p class=\"caption\">{}</p>\n", escape_xml(text)))
        }
        Block::Table(table) => render_table(html, table),
        Block::Figure(svg) => html.push_str(&format!("<div class=\"figure\">\n{svg}</div>\n")),
    }
}

fn render_table(html: &mut String, table: &ReportTable) {
    html.push_str("<table>\n<thead><tr>");
    for header in &table.headers {
        html.push_str(&format!("<th>{}</th>", escape_xml(header)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape_xml(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
}

/// Reads an SVG artifact so it can be embedded in a page.
pub fn load_figure(path: &Path) -> Result<Block, RenderError> {
    let svg = fs::read_to_string(path).map_err(|source| RenderError::io(path, source))?;
    Ok(Block::Figure(svg))
}

pub fn write_document(path: &Path, document: &ReportDocument) -> Result<(), RenderError> {
    fs::write(path, document.to_html()).map_err(|source| RenderError::io(path, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ReportTable {
        ReportTable {
            title: "t".to_string(),
            headers: vec!["Rank".to_string(), "Value".to_string()],
            rows: vec![
                vec!["1".to_string(), "1/1 = 1.00".to_string()],
                vec!["2".to_string(), "1/2 = 0.50".to_string()],
            ],
        }
    }

    #[test]
    fn every_page_carries_header_with_page_number() {
        let mut document = ReportDocument::new("Report", "Ada <L>", "S2021-0123");
        document
            .new_page()
            .push(Block::Heading("Report".to_string()))
            .push(Block::Table(table()));
        document.new_page().push(Block::Paragraph("b) curves".to_string()));

        let html = document.to_html();
        assert_eq!(html.matches("<section class=\"page\">").count(), 2);
        assert!(html.contains("Name: Ada &lt;L&gt;<br>Roll Number: S2021-0123<br>Page 1"));
        assert!(html.contains("<br>Page 2</div>"));
        assert!(!html.contains("Page 3"));
    }

    #[test]
    fn tables_render_every_row() {
        let mut document = ReportDocument::new("Report", "Ada", "1");
        document.new_page().push(Block::Table(table()));

        let html = document.to_html();
        assert_eq!(html.matches("<tr>").count(), 3);
        assert!(html.contains("<th>Rank</th><th>Value</th>"));
        assert!(html.contains("<td>1/2 = 0.50</td>"));
    }

    #[test]
    fn load_figure_embeds_file_contents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("curve.svg");
        fs::write(&path, "<svg></svg>\n").expect("write svg");

        let block = load_figure(&path).expect("figure");
        assert_eq!(block, Block::Figure("<svg></svg>\n".to_string()));

        let mut document = ReportDocument::new("Report", "Ada", "1");
        document.new_page().push(block);
        assert!(document.to_html().contains("<div class=\"figure\">\n<svg></svg>\n</div>"));
    }

    #[test]
    fn load_figure_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_figure(&dir.path().join("absent.svg")).unwrap_err();
        assert!(err.to_string().contains("absent.svg"));
    }

    #[test]
    fn write_document_creates_html_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.html");
        let mut document = ReportDocument::new("Report", "Ada", "1");
        document.new_page().push(Block::Caption("caption".to_string()));

        write_document(&path, &document).expect("document written");
        let html = fs::read_to_string(&path).expect("read html");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<p class=\"caption\">caption</p>"));
    }
}
