//! Modelos de dominio (tipos de documento y metadatos de ficheros de la carpeta).

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Formatos tabulares que se aplanan a una tabla de texto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TabularFormat {
    Csv,
    Xlsx,
}

/// Conjunto cerrado de tipos de documento que sabe tratar el extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "format", rename_all = "snake_case")]
pub enum DocumentKind {
    Tabular(TabularFormat),
    Pdf,
    PlainText,
    Unsupported,
}

impl DocumentKind {
    /// Clasifica por sufijo del nombre, sin distinguir mayúsculas.
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.ends_with(".csv") {
            Self::Tabular(TabularFormat::Csv)
        } else if name.ends_with(".xlsx") {
            Self::Tabular(TabularFormat::Xlsx)
        } else if name.ends_with(".pdf") {
            Self::Pdf
        } else if name.ends_with(".txt") {
            Self::PlainText
        } else {
            Self::Unsupported
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.file_name()
            .map(|n| Self::from_name(&n.to_string_lossy()))
            .unwrap_or(Self::Unsupported)
    }

    /// Extensión canónica (sin punto) del tipo.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            Self::Tabular(TabularFormat::Csv) => Some("csv"),
            Self::Tabular(TabularFormat::Xlsx) => Some("xlsx"),
            Self::Pdf => Some("pdf"),
            Self::PlainText => Some("txt"),
            Self::Unsupported => None,
        }
    }
}

/// Un fichero soportado dentro de la carpeta elegida.
/// Se recalcula en cada ciclo de render; nunca se cachea.
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub extension: String,
    pub kind: DocumentKind,
    pub size_bytes: u64,
    pub modified_at: Option<String>,
    pub mime_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_suffixes_case_insensitively() {
        assert_eq!(DocumentKind::from_name("Q3.CSV"), DocumentKind::Tabular(TabularFormat::Csv));
        assert_eq!(DocumentKind::from_name("plan.Xlsx"), DocumentKind::Tabular(TabularFormat::Xlsx));
        assert_eq!(DocumentKind::from_name("audit.PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_name("notes.txt"), DocumentKind::PlainText);
    }

    #[test]
    fn rejects_lookalikes() {
        assert_eq!(DocumentKind::from_name("report.docx"), DocumentKind::Unsupported);
        assert_eq!(DocumentKind::from_name("legacy.xls"), DocumentKind::Unsupported);
        assert_eq!(DocumentKind::from_name("csv"), DocumentKind::Unsupported);
        assert_eq!(DocumentKind::from_name("notes.txt.bak"), DocumentKind::Unsupported);
        assert_eq!(DocumentKind::from_name("image.png").extension(), None);
    }

    #[test]
    fn path_without_file_name_is_unsupported() {
        assert_eq!(DocumentKind::from_path(Path::new("/")), DocumentKind::Unsupported);
    }
}
