//! Extracción de texto plano a partir de un fichero de la carpeta.
//!
//! El tipo de documento se decide por sufijo (ver [`DocumentKind`]) y cada
//! variante tiene su propio manejador:
//!   - CSV / XLSX: se aplanan a una tabla de texto con columna de índice.
//!   - PDF: texto de cada página, omitiendo las vacías, unido con un espacio.
//!   - TXT: contenido en bruto decodificado como UTF-8.

use std::fmt::Display;
use std::fs;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{DocumentKind, TabularFormat};

/// Celda ausente o vacía en una tabla aplanada.
const MISSING_CELL: &str = "NaN";

/// Fallo de extracción. El `Display` es exactamente el texto que ve el usuario.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format.")]
    Unsupported,
    #[error("Error reading file: {details}")]
    Read { details: String },
}

fn read_error(err: impl Display) -> ExtractionError {
    ExtractionError::Read {
        details: err.to_string(),
    }
}

/// Extrae el texto de `path` devolviendo un error estructurado si falla.
pub fn extract(path: &Path) -> Result<String, ExtractionError> {
    let kind = DocumentKind::from_path(path);
    let result = match kind {
        DocumentKind::Tabular(TabularFormat::Csv) => extract_csv(path),
        DocumentKind::Tabular(TabularFormat::Xlsx) => extract_xlsx(path),
        DocumentKind::Pdf => extract_pdf(path),
        DocumentKind::PlainText => extract_plain_text(path),
        DocumentKind::Unsupported => Err(ExtractionError::Unsupported),
    };

    match &result {
        Ok(text) => debug!(
            "Extraídos {} caracteres de {} ({:?})",
            text.chars().count(),
            path.display(),
            kind
        ),
        Err(err) => warn!("No se pudo extraer texto de {}: {}", path.display(), err),
    }
    result
}

/// Versión que nunca falla: los errores se convierten en su mensaje.
pub fn extract_text(path: &Path) -> String {
    extract(path).unwrap_or_else(|err| err.to_string())
}

fn extract_csv(path: &Path) -> Result<String, ExtractionError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(read_error)?;

    let header: Vec<String> = reader
        .headers()
        .map_err(read_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_error)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(render_table(&header, &rows))
}

fn extract_xlsx(path: &Path) -> Result<String, ExtractionError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(read_error)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| read_error("workbook has no worksheets"))?
        .map_err(read_error)?;

    let mut rows = range.rows().map(|row| {
        row.iter()
            .map(|cell| match cell {
                Data::Empty => String::new(),
                other => other.to_string(),
            })
            .collect::<Vec<String>>()
    });

    let header = rows.next().unwrap_or_default();
    let body: Vec<Vec<String>> = rows.collect();
    Ok(render_table(&header, &body))
}

fn extract_pdf(path: &Path) -> Result<String, ExtractionError> {
    let bytes = fs::read(path).map_err(read_error)?;

    // pdf-extract puede hacer panic con fuentes mal formadas.
    let pages = match catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(&bytes)
    })) {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => return Err(read_error(e)),
        Err(_) => return Err(read_error("PDF parser panicked (malformed document)")),
    };

    Ok(join_pages(&pages))
}

fn extract_plain_text(path: &Path) -> Result<String, ExtractionError> {
    let bytes = fs::read(path).map_err(read_error)?;
    String::from_utf8(bytes).map_err(read_error)
}

/// Une las páginas con texto mediante un espacio; las páginas vacías se omiten.
fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|page| page.trim())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Aplana una tabla a texto: columna de índice a la izquierda y columnas
/// alineadas a la derecha separadas por dos espacios.
fn render_table(header: &[String], rows: &[Vec<String>]) -> String {
    let width = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);

    if width == 0 {
        return "Empty DataFrame".to_string();
    }

    let columns: Vec<String> = (0..width)
        .map(|i| match header.get(i) {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("Unnamed: {i}"),
        })
        .collect();

    if rows.is_empty() {
        return format!("Empty DataFrame\nColumns: [{}]\nIndex: []", columns.join(", "));
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            (0..width)
                .map(|i| match row.get(i) {
                    Some(cell) if !cell.is_empty() => cell.clone(),
                    _ => MISSING_CELL.to_string(),
                })
                .collect()
        })
        .collect();

    let index_width = (rows.len() - 1).to_string().len();
    let col_widths: Vec<usize> = (0..width)
        .map(|i| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(columns[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(cells.len() + 1);

    let mut line = " ".repeat(index_width);
    for (name, w) in columns.iter().zip(&col_widths) {
        line.push_str(&format!("  {:>w$}", name, w = w));
    }
    lines.push(line);

    for (idx, row) in cells.iter().enumerate() {
        let mut line = format!("{:<w$}", idx, w = index_width);
        for (cell, w) in row.iter().zip(&col_widths) {
            line.push_str(&format!("  {:>w$}", cell, w = w));
        }
        lines.push(line);
    }

    lines.join("\n")
}
