use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use crate::{config::AppConfig, summarizer::Summarizer};

/// Estado compartido entre peticiones. El resumidor (y con él el modelo)
/// se construye una sola vez al arrancar y no cambia después.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub summarizer: Summarizer,
    pub shutdown_sender: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}
