//! Adaptador de resumen: decide si merece la pena llamar al modelo y con qué límites.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::{info, warn};

use crate::llm::{GenerationParams, SummaryModel};

/// Por debajo de este número de palabras el texto se devuelve tal cual.
pub const MIN_WORDS_FOR_SUMMARY: usize = 80;

pub const SUMMARY_PARAMS: GenerationParams = GenerationParams {
    max_length: 150,
    min_length: 60,
    do_sample: false,
};

/// `true` si el texto tiene palabras suficientes para llamar al modelo.
pub fn should_summarize(text: &str) -> bool {
    text.split_whitespace().count() >= MIN_WORDS_FOR_SUMMARY
}

#[derive(Clone)]
pub struct Summarizer {
    model: Arc<dyn SummaryModel>,
    max_input_words: usize,
}

impl Summarizer {
    pub fn new(model: Arc<dyn SummaryModel>, max_input_words: usize) -> Self {
        Self {
            model,
            max_input_words: max_input_words.max(MIN_WORDS_FOR_SUMMARY),
        }
    }

    /// Devuelve el texto tal cual si es corto; si no, el resumen del modelo.
    /// Los errores del modelo se propagan sin reintentos.
    pub async fn summarize(&self, text: &str) -> Result<String> {
        if !should_summarize(text) {
            return Ok(text.to_string());
        }

        let word_count = text.split_whitespace().count();

        let input = if word_count > self.max_input_words {
            warn!(
                "Texto de {} palabras recortado a {} antes de resumir",
                word_count, self.max_input_words
            );
            text.split_whitespace()
                .take(self.max_input_words)
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            text.to_string()
        };

        info!("Resumiendo texto de {} palabras", word_count);
        let summary = self.model.generate(&input, &SUMMARY_PARAMS).await?;
        if summary.trim().is_empty() {
            return Err(anyhow!("El modelo devolvió un resumen vacío"));
        }

        Ok(summary)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Modelo falso que registra cada llamada.
    #[derive(Default)]
    pub(crate) struct FakeModel {
        pub calls: Mutex<Vec<(String, GenerationParams)>>,
        pub reply: Option<String>,
        pub fail: bool,
    }

    #[async_trait]
    impl SummaryModel for FakeModel {
        async fn generate(&self, text: &str, params: &GenerationParams) -> Result<String> {
            self.calls.lock().unwrap().push((text.to_string(), *params));
            if self.fail {
                return Err(anyhow!("input exceeds model context"));
            }
            Ok(self
                .reply
                .clone()
                .unwrap_or_else(|| format!("summary of {} words", text.split_whitespace().count())))
        }
    }

    pub(crate) fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    fn summarizer(model: &Arc<FakeModel>, max_input_words: usize) -> Summarizer {
        Summarizer::new(model.clone(), max_input_words)
    }

    #[test]
    fn short_text_passes_through_without_model_call() {
        let model = Arc::new(FakeModel::default());
        let s = summarizer(&model, 3000);
        let just_below = words(79);

        for text in ["", "Hello world", just_below.as_str(), "  spaced\n\tout   text  "] {
            let out = tokio_test::block_on(s.summarize(text)).unwrap();
            assert_eq!(out, text);
        }
        assert!(model.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn long_text_invokes_model_with_fixed_bounds() {
        let model = Arc::new(FakeModel::default());
        let s = summarizer(&model, 3000);
        let text = words(80);

        assert!(should_summarize(&text));
        let out = s.summarize(&text).await.unwrap();
        assert!(!out.is_empty());

        let calls = model.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, text);
        assert_eq!(
            calls[0].1,
            GenerationParams {
                max_length: 150,
                min_length: 60,
                do_sample: false
            }
        );
    }

    #[tokio::test]
    async fn oversized_input_is_truncated_to_word_budget() {
        let model = Arc::new(FakeModel::default());
        let s = summarizer(&model, 100);

        let out = s.summarize(&words(250)).await.unwrap();
        assert_eq!(out, "summary of 100 words");
        assert_eq!(model.calls.lock().unwrap()[0].0, words(100));
    }

    #[tokio::test]
    async fn model_failure_propagates() {
        let model = Arc::new(FakeModel {
            fail: true,
            ..Default::default()
        });
        let s = summarizer(&model, 3000);

        assert!(s.summarize(&words(120)).await.is_err());
    }

    #[tokio::test]
    async fn empty_model_output_is_an_error() {
        let model = Arc::new(FakeModel {
            reply: Some("   ".to_string()),
            ..Default::default()
        });
        let s = summarizer(&model, 3000);

        assert!(s.summarize(&words(90)).await.is_err());
    }
}
