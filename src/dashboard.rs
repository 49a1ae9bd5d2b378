//! Ciclo de render del dashboard.
//!
//! Cada interacción (cambio de carpeta o de fichero) recalcula la vista desde cero:
//!   1. Carpeta vacía → `AwaitingFolderInput`.
//!   2. Carpeta inexistente o inválida → `FolderInvalid`.
//!   3. Sin ficheros soportados → `FolderEmpty`.
//!   4. Sin selección válida → `FilesListed`.
//!   5. Fichero elegido → extracción + resumen → `FileSelected`.
//!
//! Sólo el resumen puede hacer fallar el ciclo completo.

use anyhow::{anyhow, Result};
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::{
    extract,
    locator::{self, LocatorError},
    models::FileEntry,
    panels::{self, InfoPanel},
    summarizer::{should_summarize, Summarizer},
};

pub const FOLDER_NOT_FOUND_MESSAGE: &str = "Folder path does not exist";
pub const NOT_A_DIRECTORY_MESSAGE: &str = "Path is not a directory";
pub const NO_FILES_MESSAGE: &str = "No supported files (.csv, .xlsx, .pdf, .txt) found in this folder";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView {
    AwaitingFolderInput,
    FolderInvalid {
        message: String,
    },
    FolderEmpty {
        folder: String,
        message: String,
    },
    FilesListed {
        folder: String,
        files: Vec<FileEntry>,
    },
    FileSelected {
        folder: String,
        files: Vec<FileEntry>,
        selected: FileEntry,
        /// Contenido recortado al presupuesto de visualización.
        content: String,
        content_truncated: bool,
        word_count: usize,
        summary: String,
        summarized: bool,
        panels: [InfoPanel; 3],
    },
}

/// Ejecuta un ciclo completo para la carpeta y el fichero indicados.
pub async fn render_cycle(
    folder_path: &str,
    selected_file: Option<&str>,
    summarizer: &Summarizer,
    preview_chars: usize,
) -> Result<DashboardView> {
    let span = info_span!("render_cycle", cycle_id = %Uuid::new_v4());
    run_cycle(folder_path, selected_file, summarizer, preview_chars)
        .instrument(span)
        .await
}

async fn run_cycle(
    folder_path: &str,
    selected_file: Option<&str>,
    summarizer: &Summarizer,
    preview_chars: usize,
) -> Result<DashboardView> {
    // Sin recortar: una carpeta puede llamarse "data " de verdad.
    let folder = folder_path;
    if folder.trim().is_empty() {
        return Ok(DashboardView::AwaitingFolderInput);
    }

    let files = match locator::list_supported_files(folder) {
        Ok(files) => files,
        Err(LocatorError::EmptyPath) => return Ok(DashboardView::AwaitingFolderInput),
        Err(err) => {
            info!("Carpeta no válida: {}", err);
            let message = match err {
                LocatorError::NotFound(_) => FOLDER_NOT_FOUND_MESSAGE.to_string(),
                LocatorError::NotADirectory(_) => NOT_A_DIRECTORY_MESSAGE.to_string(),
                other => other.to_string(),
            };
            return Ok(DashboardView::FolderInvalid { message });
        }
    };

    if files.is_empty() {
        return Ok(DashboardView::FolderEmpty {
            folder: folder.to_string(),
            message: NO_FILES_MESSAGE.to_string(),
        });
    }

    let Some(selected) = selected_file
        .and_then(|name| files.iter().find(|f| f.name == name))
        .cloned()
    else {
        return Ok(DashboardView::FilesListed {
            folder: folder.to_string(),
            files,
        });
    };

    info!("Procesando fichero: {}", selected.name);
    let path = selected.path.clone();
    // Los fallos de extracción llegan como texto y siguen el flujo normal.
    let raw_text = tokio::task::spawn_blocking(move || extract::extract_text(&path))
        .await
        .map_err(|e| anyhow!("La extracción terminó de forma inesperada: {e}"))?;
    let word_count = raw_text.split_whitespace().count();

    let summarized = should_summarize(&raw_text);
    let summary = summarizer.summarize(&raw_text).await?;
    let (content, content_truncated) = truncate_chars(&raw_text, preview_chars);

    Ok(DashboardView::FileSelected {
        folder: folder.to_string(),
        files,
        selected,
        content,
        content_truncated,
        word_count,
        summary,
        summarized,
        panels: panels::consulting_panels(),
    })
}

/// Recorta a `max_chars` caracteres (no bytes).
fn truncate_chars(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (text[..byte_idx].to_string(), true),
        None => (text.to_string(), false),
    }
}
