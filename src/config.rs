//! Carga y gestión de configuración de la aplicación (servidor + modelo de resumen).

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

/// Configuración completa de la aplicación.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_addr: String,
    /// Valor inicial del campo de carpeta en el frontend.
    pub default_folder: PathBuf,

    pub llm_summary_model: String,
    /// Presupuesto de palabras que se envía al modelo; el resto se descarta.
    pub summary_max_input_words: usize,
    /// Caracteres del contenido extraído que se muestran en el panel izquierdo.
    pub content_preview_chars: usize,
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno (usando .env si existe).
    pub fn from_env() -> Result<Self> {
        env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow!("Falta OPENAI_API_KEY en el entorno"))?;

        let server_addr =
            env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:3322".to_string());

        let default_folder = env::var("DEFAULT_FOLDER")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_consulting_folder());

        let llm_summary_model =
            env::var("LLM_SUMMARY_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let summary_max_input_words =
            positive_from_env("SUMMARY_MAX_INPUT_WORDS", 3000)?;
        let content_preview_chars = positive_from_env("CONTENT_PREVIEW_CHARS", 5000)?;

        Ok(Self {
            server_addr,
            default_folder,
            llm_summary_model,
            summary_max_input_words,
            content_preview_chars,
        })
    }
}

fn default_consulting_folder() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join("Consulting_Data"),
        None => PathBuf::from("Consulting_Data"),
    }
}

fn positive_from_env(key: &str, default: usize) -> Result<usize> {
    match env::var(key) {
        Ok(raw) => parse_positive(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<usize> {
    let value: usize = raw
        .trim()
        .parse()
        .map_err(|e| anyhow!("Valor inválido para {key} ('{raw}'): {e}"))?;
    if value == 0 {
        return Err(anyhow!("{key} debe ser mayor que cero"));
    }
    Ok(value)
}
