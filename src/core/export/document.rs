//! Word template filling (`.docx`).
//!
//! Only `word/document.xml` is rewritten. Every other part of the template
//! package is copied through unchanged.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::core::i18n::Translator;
use crate::state::{EditorSession, Segment};
use crate::utils::sanitize_filename;
use super::{part_text, read_package, write_package, xml_escape, ExportError, ExportResult};

const DOCUMENT_PART: &str = "word/document.xml";
const TABLE_END: &str = "</w:tbl>";

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Values substituted into the `{{...}}` placeholders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentFields {
    pub theme: String,
    pub trainer: String,
    pub player_count: u32,
    pub time: String,
    pub requirements: String,
    pub team: String,
    pub tools: String,
}

impl DocumentFields {
    pub fn from_session(session: &EditorSession) -> Self {
        let settings = session.settings();
        let labels = session.labels();
        Self {
            theme: session.plan_name.clone(),
            trainer: settings.trainer_name.clone(),
            player_count: session.player_count,
            time: format!("{} min", session.timeline.total_minutes()),
            requirements: settings.requirements.clone(),
            team: settings.team.clone(),
            tools: session.tool_summary().display_or(&labels.tr("no_tools")).to_string(),
        }
    }

    fn placeholders(&self) -> [(&'static str, String); 7] {
        [
            ("theme", self.theme.clone()),
            ("name", self.trainer.clone()),
            ("playNumber", self.player_count.to_string()),
            ("time", self.time.clone()),
            ("requirements", self.requirements.clone()),
            ("team", self.team.clone()),
            ("tools", self.tools.clone()),
        ]
    }
}

/// `<plan>_<trainer>_<YYYY-MM-DD>.docx`, safe for any filesystem.
pub fn default_document_name(plan_name: &str, trainer: &str, date: NaiveDate) -> String {
    let stem = if trainer.trim().is_empty() {
        format!("{}_{}", plan_name.trim(), date.format("%Y-%m-%d"))
    } else {
        format!("{}_{}_{}", plan_name.trim(), trainer.trim(), date.format("%Y-%m-%d"))
    };
    format!("{}.docx", sanitize_filename(&stem))
}

/// Copy `template` to `output`, filling placeholders and appending one row
/// per segment to the last table.
pub fn fill_template(
    template: &Path,
    output: &Path,
    fields: &DocumentFields,
    segments: &[Segment],
    labels: &Translator,
) -> ExportResult<()> {
    if !template.is_file() {
        return Err(ExportError::TemplateNotFound {
            path: template.to_path_buf(),
        });
    }
    let parts = read_package(template)?;
    let document = part_text(&parts, DOCUMENT_PART)?.ok_or_else(|| ExportError::MalformedDocument {
        message: format!("{} is missing", DOCUMENT_PART),
    })?;
    let filled = fill_document_xml(&document, fields, segments, labels)?;

    let rewritten: Vec<(&str, &[u8])> = parts
        .iter()
        .map(|(name, data)| {
            if name == DOCUMENT_PART {
                (name.as_str(), filled.as_bytes())
            } else {
                (name.as_str(), data.as_slice())
            }
        })
        .collect();
    write_package(output, rewritten)?;
    log::info!(
        "document with {} sections written to {}",
        segments.len(),
        output.display()
    );
    Ok(())
}

fn fill_document_xml(
    document: &str,
    fields: &DocumentFields,
    segments: &[Segment],
    labels: &Translator,
) -> ExportResult<String> {
    let mut xml = document.to_string();
    for (key, value) in fields.placeholders() {
        let placeholder = format!("{{{{{}}}}}", key);
        if xml.contains(&placeholder) {
            xml = xml.replace(&placeholder, &run_text(&value));
        } else {
            log::debug!("template has no {} placeholder", placeholder);
        }
    }

    let table_end = xml.rfind(TABLE_END).ok_or_else(|| ExportError::MalformedDocument {
        message: "template has no sections table".to_string(),
    })?;
    let rows: String = segments.iter().map(|segment| section_row(segment, labels)).collect();
    xml.insert_str(table_end, &rows);
    Ok(xml)
}

/// Escaped text for the inside of a `<w:t>`; newlines become breaks.
fn run_text(value: &str) -> String {
    value
        .split('\n')
        .map(xml_escape)
        .collect::<Vec<_>>()
        .join(r#"</w:t><w:br/><w:t xml:space="preserve">"#)
}

fn section_row(segment: &Segment, labels: &Translator) -> String {
    let cells = [
        format!("{} min", segment.duration),
        segment.name.clone(),
        labels.tr(segment.organisation.label_key()),
        segment.explanation.clone(),
        segment.tools.clone(),
    ];
    let mut row = String::from("<w:tr>");
    for cell in &cells {
        row.push_str(&table_cell(cell, false));
    }
    row.push_str("</w:tr>");
    row
}

fn table_cell(text: &str, bold: bool) -> String {
    format!(
        "<w:tc><w:p>{}</w:p></w:tc>",
        text_run(text, bold)
    )
}

fn text_run(text: &str, bold: bool) -> String {
    let props = if bold { "<w:rPr><w:b/></w:rPr>" } else { "" };
    format!(
        r#"<w:r>{}<w:t xml:space="preserve">{}</w:t></w:r>"#,
        props,
        run_text(text)
    )
}

/// Write a minimal template with every placeholder and an empty sections
/// table carrying only its header row.
pub fn write_sample_template(path: &Path, labels: &Translator) -> ExportResult<PathBuf> {
    let mut body = String::new();
    body.push_str(&heading(&labels.tr("template_title")));
    body.push_str(&heading(&labels.tr("template_general_info")));
    for (label_key, placeholder) in [
        ("template_theme", "theme"),
        ("template_trainer", "name"),
        ("template_players", "playNumber"),
        ("template_total_duration", "time"),
        ("template_requirements", "requirements"),
        ("template_team", "team"),
        ("template_tools", "tools"),
    ] {
        body.push_str(&format!(
            "<w:p>{}{}</w:p>",
            text_run(&format!("{}: ", labels.tr(label_key)), true),
            text_run(&format!("{{{{{}}}}}", placeholder), false)
        ));
    }
    body.push_str(&heading(&labels.tr("template_sections")));

    body.push_str(
        r#"<w:tbl><w:tblPr><w:tblStyle w:val="TableGrid"/><w:tblW w:w="0" w:type="auto"/><w:tblBorders><w:top w:val="single" w:sz="4"/><w:left w:val="single" w:sz="4"/><w:bottom w:val="single" w:sz="4"/><w:right w:val="single" w:sz="4"/><w:insideH w:val="single" w:sz="4"/><w:insideV w:val="single" w:sz="4"/></w:tblBorders></w:tblPr><w:tblGrid>"#,
    );
    for _ in 0..5 {
        body.push_str(r#"<w:gridCol w:w="1870"/>"#);
    }
    body.push_str("</w:tblGrid><w:tr>");
    for key in [
        "column_time_slot",
        "column_goal",
        "column_organisation",
        "column_explanation",
        "column_tools",
    ] {
        body.push_str(&table_cell(&labels.tr(key), true));
    }
    body.push_str("</w:tr></w:tbl>");

    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        W_NS, body
    );
    write_package(
        path,
        [
            ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
            ("_rels/.rels", ROOT_RELS.as_bytes()),
            (DOCUMENT_PART, document.as_bytes()),
        ],
    )?;
    log::info!("sample template written to {}", path.display());
    Ok(path.to_path_buf())
}

fn heading(text: &str) -> String {
    format!("<w:p>{}</w:p>", text_run(text, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Organisation, SegmentDraft, Timeline};

    fn labels() -> Translator {
        Translator::with_dir("en-us", "en-us", None)
    }

    fn fields() -> DocumentFields {
        DocumentFields {
            theme: "Passing & moving".to_string(),
            trainer: "Sam".to_string(),
            player_count: 14,
            time: "90 min".to_string(),
            requirements: "Turf\nLights".to_string(),
            team: "U13".to_string(),
            tools: "2 goals, 10 cones".to_string(),
        }
    }

    fn segments() -> Vec<Segment> {
        let mut timeline = Timeline::new(90).unwrap();
        timeline.append(SegmentDraft::new("Rondo", 15).with_tools("10 cones")).unwrap();
        timeline
            .append(
                SegmentDraft::new("Game", 30)
                    .with_organisation(Organisation::GameForm)
                    .with_explanation("Two touch")
                    .with_tools("2 goals"),
            )
            .unwrap();
        timeline.segments().to_vec()
    }

    #[test]
    fn test_fill_document_xml_replaces_and_appends_rows() {
        let xml = r#"<w:body><w:p><w:r><w:t>{{theme}} by {{name}}</w:t></w:r></w:p><w:p><w:r><w:t>{{requirements}}</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl><w:tbl><w:tr><w:tc><w:p><w:r><w:t>Time Slot</w:t></w:r></w:p></w:tc></w:tr></w:tbl></w:body>"#;
        let filled = fill_document_xml(xml, &fields(), &segments(), &labels()).unwrap();

        assert!(filled.contains("Passing &amp; moving by Sam"));
        assert!(filled.contains(r#"Turf</w:t><w:br/><w:t xml:space="preserve">Lights"#));
        assert!(!filled.contains("{{"));

        let first_table_end = filled.find(TABLE_END).unwrap();
        assert!(!filled[..first_table_end].contains("Rondo"));
        let rondo = filled.find("Rondo").unwrap();
        let game = filled.find("Game form").unwrap();
        assert!(rondo < game);
        assert!(filled.contains(">15 min<"));
        assert!(filled.contains(">30 min<"));
        assert!(filled.ends_with("</w:tr></w:tbl></w:body>"));
    }

    #[test]
    fn test_document_without_table_is_malformed() {
        let result = fill_document_xml("<w:body/>", &fields(), &segments(), &labels());
        assert!(matches!(result, Err(ExportError::MalformedDocument { .. })));
    }

    #[test]
    fn test_sample_template_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("template.docx");
        let output = dir.path().join("out.docx");
        write_sample_template(&template, &labels()).unwrap();

        let sample = part_text(&read_package(&template).unwrap(), DOCUMENT_PART)
            .unwrap()
            .unwrap();
        for key in ["theme", "name", "playNumber", "time", "requirements", "team", "tools"] {
            assert!(sample.contains(&format!("{{{{{}}}}}", key)), "missing {}", key);
        }

        fill_template(&template, &output, &fields(), &segments(), &labels()).unwrap();
        let parts = read_package(&output).unwrap();
        assert_eq!(parts.len(), 3);
        let document = part_text(&parts, DOCUMENT_PART).unwrap().unwrap();
        assert!(document.contains(">14<"));
        assert!(document.contains("Two touch"));
        assert_eq!(
            part_text(&parts, "_rels/.rels").unwrap().as_deref(),
            Some(ROOT_RELS)
        );
    }

    #[test]
    fn test_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let result = fill_template(
            &dir.path().join("nope.docx"),
            &dir.path().join("out.docx"),
            &fields(),
            &[],
            &labels(),
        );
        assert!(matches!(result, Err(ExportError::TemplateNotFound { .. })));
    }

    #[test]
    fn test_default_document_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            default_document_name("Tuesday: U13", "Sam", date),
            "Tuesday_ U13_Sam_2024-03-09.docx"
        );
        assert_eq!(default_document_name("Plan", "  ", date), "Plan_2024-03-09.docx");
    }
}
