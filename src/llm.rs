//! Abstracción sobre Rig para el modelo de resumen abstractivo.
//!
//! El resto de la aplicación sólo ve el trait [`SummaryModel`]; el cliente
//! de OpenAI se construye una única vez al arrancar y se comparte después.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rig::completion::Prompt;
use rig::providers::openai;
use serde_json::json;

use crate::config::AppConfig;

/// Límites de generación que se pasan al modelo en cada llamada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    pub max_length: u32,
    pub min_length: u32,
    /// `false` = decodificación determinista.
    pub do_sample: bool,
}

/// Un modelo capaz de generar un resumen de un texto.
///
/// Las implementaciones no deben mutar estado compartido: la misma instancia
/// se usa desde varias peticiones a la vez.
#[async_trait]
pub trait SummaryModel: Send + Sync {
    async fn generate(&self, text: &str, params: &GenerationParams) -> Result<String>;
}

/// Gestor del modelo de resumen sobre OpenAI (vía Rig).
#[derive(Clone)]
pub struct LlmManager {
    client: openai::Client,
    pub summary_model: String,
}

impl LlmManager {
    /// Construye el manager a partir de la configuración.
    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        if cfg.llm_summary_model.trim().is_empty() {
            return Err(anyhow!("LLM_SUMMARY_MODEL no puede estar vacío"));
        }
        Ok(Self {
            client: openai::Client::from_env(),
            summary_model: cfg.llm_summary_model.clone(),
        })
    }
}

fn summary_preamble(params: &GenerationParams) -> String {
    format!(
        r#"
You are an abstractive summarization model.
Write a single summary of the text supplied by the user, in the language of the text.
The summary must be between {min} and {max} tokens long.
Use only information present in the text. Do not add titles, lists, or commentary; output only the summary.
"#,
        min = params.min_length,
        max = params.max_length,
    )
}

/// Semilla fija enviada cuando no se muestrea, para que OpenAI repita la salida.
const DETERMINISTIC_SEED: u64 = 42;

/// Temperatura y parámetros extra del proveedor según el modo de decodificación.
fn decoding_options(params: &GenerationParams) -> (f64, serde_json::Value) {
    if params.do_sample {
        (0.7, json!({}))
    } else {
        (0.0, json!({ "seed": DETERMINISTIC_SEED }))
    }
}

#[async_trait]
impl SummaryModel for LlmManager {
    async fn generate(&self, text: &str, params: &GenerationParams) -> Result<String> {
        // Trait para client.agent(...)
        use rig::client::CompletionClient as _;

        let (temperature, extra) = decoding_options(params);

        let agent = self
            .client
            .agent(&self.summary_model)
            .preamble(&summary_preamble(params))
            .temperature(temperature)
            .max_tokens(u64::from(params.max_length))
            .additional_params(extra)
            .build();

        let summary = agent.prompt(text).await?;
        Ok(summary.trim().to_string())
    }
}
