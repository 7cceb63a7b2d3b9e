// FILE: crates/library/src/export.rs

//! Reading list export
//!
//! CSV cells are always double-quoted with embedded quotes doubled, rows
//! are joined by `\n` without a trailing newline. JSON export writes the
//! same records the store keeps.

use crate::error::{LibraryError, Result};
use readtrack_core::{Book, DATE_FORMAT};
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use tempfile::NamedTempFile;

pub const CSV_HEADERS: [&str; 10] = [
    "Title",
    "Author",
    "Current Page",
    "Total Pages",
    "Target Page",
    "Target Date",
    "Publisher",
    "Publish Year",
    "ISBN",
    "Categories",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(LibraryError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Wraps a cell in double quotes, doubling any quote inside
pub fn csv_escape(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fn csv_row(cells: &[String]) -> String {
    cells
        .iter()
        .map(|cell| csv_escape(cell))
        .collect::<Vec<_>>()
        .join(",")
}

fn book_cells(book: &Book) -> Vec<String> {
    vec![
        book.title.clone(),
        book.author.clone(),
        book.current_page.to_string(),
        book.total_pages.to_string(),
        book.target_page.map(|p| p.to_string()).unwrap_or_default(),
        book.target_date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default(),
        book.publisher.clone().unwrap_or_default(),
        book.publish_year.map(|y| y.to_string()).unwrap_or_default(),
        book.isbn.clone().unwrap_or_default(),
        book.categories.join("; "),
    ]
}

/// Header row plus one row per book, in list order
pub fn to_csv(books: &[Book]) -> String {
    let header: Vec<String> = CSV_HEADERS.iter().map(|h| h.to_string()).collect();

    std::iter::once(csv_row(&header))
        .chain(books.iter().map(|book| csv_row(&book_cells(book))))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-printed array of stored records
pub fn to_json(books: &[Book]) -> Result<String> {
    let records: Vec<_> = books.iter().map(Book::to_record).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

pub fn render(books: &[Book], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Csv => Ok(to_csv(books)),
        ExportFormat::Json => to_json(books),
    }
}

/// Renders and atomically writes the export to `path`
pub fn write_export(books: &[Book], format: ExportFormat, path: &Path) -> Result<()> {
    let content = render(books, format)?;

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;
    temp_file.persist(path).map_err(|e| LibraryError::Io(e.error))?;

    log::info!(
        "Exported {} books as {} to {}",
        books.len(),
        format,
        path.display()
    );
    Ok(())
}
