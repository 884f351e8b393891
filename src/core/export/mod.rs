//! Export and import collaborators.
//!
//! These read a finished timeline (or produce segments for one) and never
//! leave the in-memory plan half-changed: every failure surfaces as an
//! [`ExportError`] before the caller mutates anything.

pub mod spreadsheet;
pub mod document;
pub mod raster;

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::state::TimelineError;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("template not found: {}", .path.display())]
    TemplateNotFound { path: PathBuf },
    #[error("malformed document: {message}")]
    MalformedDocument { message: String },
    #[error("row {row}: {message}")]
    Import { row: usize, message: String },
    #[error(transparent)]
    Timeline(#[from] TimelineError),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Write an OOXML package (zip of named parts) to `path`.
pub(crate) fn write_package<'a>(
    path: &Path,
    parts: impl IntoIterator<Item = (&'a str, &'a [u8])>,
) -> ExportResult<()> {
    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, data) in parts {
        zip.start_file(name, options)?;
        zip.write_all(data)?;
    }
    zip.finish()?;
    Ok(())
}

/// Read every part of an OOXML package, preserving order.
pub(crate) fn read_package(path: &Path) -> ExportResult<Vec<(String, Vec<u8>)>> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;
    let mut parts = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let mut data = Vec::new();
        entry.read_to_end(&mut data)?;
        parts.push((entry.name().to_string(), data));
    }
    Ok(parts)
}

pub(crate) fn part_text(parts: &[(String, Vec<u8>)], name: &str) -> ExportResult<Option<String>> {
    match parts.iter().find(|(part, _)| part == name) {
        Some((_, data)) => String::from_utf8(data.clone())
            .map(Some)
            .map_err(|_| ExportError::MalformedDocument {
                message: format!("{} is not valid UTF-8", name),
            }),
        None => Ok(None),
    }
}

pub(crate) fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

pub(crate) fn xml_unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
