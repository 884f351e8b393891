//! Tabular export/import as a single-sheet `.xlsx` workbook.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::core::color::Color;
use crate::core::i18n::Translator;
use crate::state::{Organisation, Segment, Timeline};
use super::{part_text, read_package, write_package, xml_escape, xml_unescape, ExportError, ExportResult};

pub const HEADERS: [&str; 7] = [
    "Section",
    "Start (min)",
    "Duration (min)",
    "Color",
    "Organisation",
    "Explanation",
    "Tools",
];

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Plan" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

static ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<row\b[^>]*?(?:/>|>(.*?)</row>)").expect("row pattern is valid"));
static CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<c\b([^>]*?)(?:/>|>(.*?)</c>)").expect("cell pattern is valid"));
static CELL_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\br="([A-Z]+)\d+""#).expect("cell ref pattern is valid"));
static CELL_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bt="([^"]+)""#).expect("cell type pattern is valid"));
static VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<v>(.*?)</v>").expect("value pattern is valid"));
static TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<t\b[^>]*>(.*?)</t>").expect("text pattern is valid"));
static SHARED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<si>(.*?)</si>").expect("shared string pattern is valid"));

/// Zero-based index of column `XFD`.
const MAX_COLUMN_INDEX: usize = 16_383;

enum CellValue<'a> {
    Text(&'a str),
    Number(u32),
}

/// Write one header row plus one row per segment.
pub fn write_spreadsheet(path: &Path, timeline: &Timeline, labels: &Translator) -> ExportResult<()> {
    let mut sheet = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    let header: Vec<CellValue> = HEADERS.iter().map(|h| CellValue::Text(h)).collect();
    push_row(&mut sheet, 1, &header);

    for (offset, segment) in timeline.segments().iter().enumerate() {
        let color = segment.color.to_hex();
        let organisation = labels.tr(segment.organisation.label_key());
        let cells = [
            CellValue::Text(&segment.name),
            CellValue::Number(segment.start),
            CellValue::Number(segment.duration),
            CellValue::Text(&color),
            CellValue::Text(&organisation),
            CellValue::Text(&segment.explanation),
            CellValue::Text(&segment.tools),
        ];
        push_row(&mut sheet, offset + 2, &cells);
    }
    sheet.push_str("</sheetData></worksheet>");

    write_package(
        path,
        [
            ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
            ("_rels/.rels", ROOT_RELS.as_bytes()),
            ("xl/workbook.xml", WORKBOOK.as_bytes()),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.as_bytes()),
            ("xl/worksheets/sheet1.xml", sheet.as_bytes()),
        ],
    )?;
    log::info!("spreadsheet written to {}", path.display());
    Ok(())
}

fn push_row(sheet: &mut String, row: usize, cells: &[CellValue]) {
    sheet.push_str(&format!(r#"<row r="{}">"#, row));
    for (col, cell) in cells.iter().enumerate() {
        let reference = format!("{}{}", column_letters(col), row);
        match cell {
            CellValue::Text(text) => sheet.push_str(&format!(
                r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                reference,
                xml_escape(text)
            )),
            CellValue::Number(value) => {
                sheet.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, value))
            }
        }
    }
    sheet.push_str("</row>");
}

fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Zero-based column for a reference like `AB`. `None` past `XFD`, the
/// last column a worksheet can have.
fn column_index(letters: &str) -> Option<usize> {
    let one_based = letters.bytes().try_fold(0usize, |acc, b| {
        acc.checked_mul(26)?.checked_add(usize::from(b.checked_sub(b'A')?) + 1)
    })?;
    one_based
        .checked_sub(1)
        .filter(|index| *index <= MAX_COLUMN_INDEX)
}

/// Read segments from the first worksheet of `path`.
///
/// Columns are matched by header (English or German titles). Start times
/// in the file are ignored; the timeline re-derives them.
pub fn read_spreadsheet(path: &Path) -> ExportResult<Vec<Segment>> {
    let parts = read_package(path)?;
    let shared = match part_text(&parts, "xl/sharedStrings.xml")? {
        Some(xml) => SHARED_ITEM
            .captures_iter(&xml)
            .map(|caps| concat_text(&caps[1]))
            .collect(),
        None => Vec::new(),
    };
    let mut sheet_names: Vec<&str> = parts
        .iter()
        .map(|(name, _)| name.as_str())
        .filter(|name| name.starts_with("xl/worksheets/sheet") && name.ends_with(".xml"))
        .collect();
    sheet_names.sort();
    let first_sheet = sheet_names.first().map(|name| name.to_string()).ok_or_else(|| {
        ExportError::MalformedDocument {
            message: "workbook has no worksheet".to_string(),
        }
    })?;
    let sheet = part_text(&parts, &first_sheet)?.unwrap_or_default();

    let rows = parse_rows(&sheet, &shared)?;
    let Some((header, body)) = rows.split_first() else {
        return Ok(Vec::new());
    };
    let columns = ColumnMap::from_header(header)?;

    let mut segments = Vec::new();
    for (offset, row) in body.iter().enumerate() {
        let row_number = offset + 2;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        segments.push(columns.segment_from_row(row, row_number)?);
    }
    log::info!("read {} segments from {}", segments.len(), path.display());
    Ok(segments)
}

fn parse_rows(sheet: &str, shared: &[String]) -> ExportResult<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    for row_caps in ROW.captures_iter(sheet) {
        let mut row: Vec<String> = Vec::new();
        let Some(body) = row_caps.get(1) else {
            rows.push(row);
            continue;
        };
        for (position, cell_caps) in CELL.captures_iter(body.as_str()).enumerate() {
            let attrs = &cell_caps[1];
            let inner = cell_caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let col = match CELL_REF.captures(attrs) {
                Some(caps) => column_index(&caps[1]).ok_or_else(|| ExportError::MalformedDocument {
                    message: format!("cell reference {} is out of range", &caps[1]),
                })?,
                None => position,
            };
            let kind = CELL_TYPE.captures(attrs).map(|caps| caps[1].to_string());
            let raw_value = VALUE.captures(inner).map(|caps| caps[1].to_string());
            let value = match kind.as_deref() {
                Some("s") => raw_value
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .and_then(|i| shared.get(i).cloned())
                    .unwrap_or_default(),
                Some("inlineStr") => concat_text(inner),
                _ => raw_value.map(|v| xml_unescape(&v)).unwrap_or_default(),
            };
            if row.len() <= col {
                row.resize(col + 1, String::new());
            }
            row[col] = value;
        }
        rows.push(row);
    }
    Ok(rows)
}

fn concat_text(xml: &str) -> String {
    TEXT.captures_iter(xml)
        .map(|caps| xml_unescape(&caps[1]))
        .collect::<Vec<_>>()
        .concat()
}

struct ColumnMap {
    name: usize,
    duration: usize,
    color: Option<usize>,
    organisation: Option<usize>,
    explanation: Option<usize>,
    tools: Option<usize>,
}

impl ColumnMap {
    fn from_header(header: &[String]) -> ExportResult<Self> {
        let find = |aliases: &[&str]| {
            header
                .iter()
                .position(|title| aliases.contains(&title.trim().to_lowercase().as_str()))
        };
        let missing = |title: &str| ExportError::Import {
            row: 1,
            message: format!("missing column '{}'", title),
        };
        Ok(Self {
            name: find(&["section", "abschnitt", "name"]).ok_or_else(|| missing("Section"))?,
            duration: find(&["duration (min)", "dauer (min)", "duration", "dauer"])
                .ok_or_else(|| missing("Duration (min)"))?,
            color: find(&["color", "colour", "farbe"]),
            organisation: find(&["organisation", "organization"]),
            explanation: find(&["explanation", "erklärung", "beschreibung"]),
            tools: find(&["tools", "material", "hilfsmittel"]),
        })
    }

    fn segment_from_row(&self, row: &[String], row_number: usize) -> ExportResult<Segment> {
        let cell = |index: usize| row.get(index).map(|s| s.trim()).unwrap_or("");
        let optional = |index: Option<usize>| index.map(cell).unwrap_or("");
        let fail = |message: String| ExportError::Import {
            row: row_number,
            message,
        };

        let name = cell(self.name);
        if name.is_empty() {
            return Err(fail("empty section name".to_string()));
        }
        let duration = parse_minutes(cell(self.duration))
            .ok_or_else(|| fail(format!("invalid duration '{}'", cell(self.duration))))?;
        let color = Color::from_hex(optional(self.color)).unwrap_or_else(Color::neutral);
        let organisation = Organisation::parse(optional(self.organisation)).unwrap_or_default();

        Ok(Segment::new(0, duration, name, color)
            .with_organisation(organisation)
            .with_explanation(optional(self.explanation))
            .with_tools(optional(self.tools)))
    }
}

/// Whole minutes, at least 1. Spreadsheet apps may store `10` as `10.0`.
fn parse_minutes(value: &str) -> Option<u32> {
    let number = value.parse::<f64>().ok()?;
    if number.fract() != 0.0 || number < 1.0 || number > f64::from(u32::MAX) {
        return None;
    }
    Some(number as u32)
}
