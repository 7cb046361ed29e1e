//! Vocabulary import (CSV and Excel) and CSV export.

use crate::error::ImportError;
use crate::vocab::VocabItem;
use calamine::{open_workbook_auto, Data, Reader};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Column positions found in a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMapping {
    word: usize,
    meaning: usize,
}

/// Detect the word and meaning columns from header names. Unknown columns are ignored.
fn detect_columns(headers: &[String]) -> Result<ColumnMapping, ImportError> {
    let mut word = None;
    let mut meaning = None;

    for (i, header) in headers.iter().enumerate() {
        match header.trim().to_lowercase().as_str() {
            "word" | "words" | "vocabulary" => word = word.or(Some(i)),
            "meaning" | "meanings" | "definition" | "definitions" | "translation" => {
                meaning = meaning.or(Some(i))
            }
            _ => {}
        }
    }

    Ok(ColumnMapping {
        word: word.ok_or(ImportError::MissingColumn("word"))?,
        meaning: meaning.ok_or(ImportError::MissingColumn("meaning"))?,
    })
}

/// Build an item from one row, skipping rows with an empty word or meaning.
fn row_to_item<'a>(
    mapping: ColumnMapping,
    mut cell: impl FnMut(usize) -> Option<&'a str>,
) -> Option<VocabItem> {
    let word = cell(mapping.word).unwrap_or("").trim();
    let meaning = cell(mapping.meaning).unwrap_or("").trim();
    if word.is_empty() || meaning.is_empty() {
        return None;
    }
    Some(VocabItem::new(word, meaning))
}

/// Read vocabulary from CSV with a header row.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<VocabItem>, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ImportError::EmptyFile);
    }
    let mapping = detect_columns(&headers)?;

    let mut items = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(item) = row_to_item(mapping, |i| record.get(i)) {
            items.push(item);
        }
    }

    Ok(items)
}

/// Read vocabulary from the first sheet of an Excel workbook.
pub fn read_workbook(path: impl AsRef<Path>) -> Result<Vec<VocabItem>, ImportError> {
    let mut workbook =
        open_workbook_auto(path.as_ref()).map_err(|e| ImportError::Workbook(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ImportError::NoSheets)?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ImportError::Workbook(e.to_string()))?;

    let mut rows = range.rows();
    let header_row = rows.next().ok_or(ImportError::EmptyFile)?;
    let headers: Vec<String> = header_row.iter().map(cell_string).collect();
    let mapping = detect_columns(&headers)?;

    let mut items = Vec::new();
    for row in rows {
        let cells: Vec<String> = row.iter().map(cell_string).collect();
        if let Some(item) = row_to_item(mapping, |i| cells.get(i).map(String::as_str)) {
            items.push(item);
        }
    }

    Ok(items)
}

/// Import a `.csv`, `.xlsx` or `.xls` file based on its extension.
pub fn import_file(path: impl AsRef<Path>) -> Result<Vec<VocabItem>, ImportError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let items = match extension.as_str() {
        "csv" => read_csv(File::open(path)?)?,
        "xlsx" | "xls" => read_workbook(path)?,
        _ => return Err(ImportError::UnsupportedFormat(extension)),
    };

    log::info!("imported {} vocabulary items from {}", items.len(), path.display());
    Ok(items)
}

/// Write vocabulary as CSV with a `word,meaning` header.
pub fn write_csv<W: Write>(writer: W, items: &[VocabItem]) -> Result<(), ImportError> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(["word", "meaning"])?;
    for item in items {
        writer.write_record([item.word.as_str(), item.meaning.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Export vocabulary to a CSV file.
pub fn export_file(path: impl AsRef<Path>, items: &[VocabItem]) -> Result<(), ImportError> {
    let path = path.as_ref();
    write_csv(File::create(path)?, items)?;
    log::info!("exported {} vocabulary items to {}", items.len(), path.display());
    Ok(())
}

fn cell_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}
