//! Localización de ficheros soportados dentro de la carpeta indicada por el usuario.
//!
//! Sólo se mira el primer nivel de la carpeta (sin recursión) y se devuelven
//! los ficheros `.csv`, `.xlsx`, `.pdf` y `.txt` ordenados por nombre.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use mime_guess::MimeGuess;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::models::{DocumentKind, FileEntry};

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("No se ha indicado ninguna carpeta")]
    EmptyPath,
    #[error("Folder path does not exist: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("Error listing folder {}: {details}", path.display())]
    Listing { path: PathBuf, details: String },
}

/// Lista los ficheros soportados de `folder_path`.
///
/// Una carpeta existente sin ficheros soportados devuelve un vector vacío, no un error.
pub fn list_supported_files(folder_path: &str) -> Result<Vec<FileEntry>, LocatorError> {
    if folder_path.trim().is_empty() {
        return Err(LocatorError::EmptyPath);
    }

    let folder = Path::new(folder_path);
    if !folder.exists() {
        return Err(LocatorError::NotFound(folder.to_path_buf()));
    }
    if !folder.is_dir() {
        return Err(LocatorError::NotADirectory(folder.to_path_buf()));
    }

    let root = folder.canonicalize().map_err(|e| LocatorError::Listing {
        path: folder.to_path_buf(),
        details: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in WalkDir::new(&root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(LocatorError::Listing {
                    path: root,
                    details: err.to_string(),
                });
            }
            Err(err) => {
                warn!("Entrada ilegible en {}: {}", root.display(), err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let kind = DocumentKind::from_name(&name);
        let Some(extension) = kind.extension() else {
            debug!("Ignorando fichero no soportado: {}", name);
            continue;
        };

        files.push(build_entry(entry.path(), name, extension, kind));
    }

    files.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    debug!("{} ficheros soportados en {}", files.len(), root.display());
    Ok(files)
}

fn build_entry(path: &Path, name: String, extension: &str, kind: DocumentKind) -> FileEntry {
    let metadata = std::fs::metadata(path).ok();
    let size_bytes = metadata.as_ref().map(|m| m.len()).unwrap_or(0);
    let modified_at = metadata
        .and_then(|m| m.modified().ok())
        .map(|t| DateTime::<Utc>::from(t).to_rfc3339());
    let mime_type = MimeGuess::from_path(path).first().map(|m| m.to_string());

    FileEntry {
        name,
        path: path.to_path_buf(),
        extension: extension.to_string(),
        kind,
        size_bytes,
        modified_at,
        mime_type,
    }
}
