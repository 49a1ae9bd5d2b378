use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::{
    app_state::AppState,
    dashboard::{self, DashboardView},
    panels::{self, InfoPanel},
};

// --- Payloads y Respuestas de la API ---

#[derive(Deserialize)]
pub struct DashboardPayload {
    #[serde(default)]
    folder_path: String,
    #[serde(default)]
    selected_file: Option<String>,
}

#[derive(Serialize)]
pub struct ConfigResponse {
    title: &'static str,
    snapshot_title: &'static str,
    default_folder: String,
    content_preview_chars: usize,
    panels: [InfoPanel; 3],
}

// --- Router ---

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/config", get(config_handler))
        .route("/api/panels", get(panels_handler))
        .route("/api/dashboard", post(dashboard_handler))
        .route("/api/health", get(health_handler))
        .route("/api/shutdown", post(shutdown_handler))
        .with_state(app_state)
}

// --- Handlers ---

#[axum::debug_handler]
async fn config_handler(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        title: panels::DASHBOARD_TITLE,
        snapshot_title: panels::SNAPSHOT_TITLE,
        default_folder: state.config.default_folder.to_string_lossy().to_string(),
        content_preview_chars: state.config.content_preview_chars,
        panels: panels::consulting_panels(),
    })
}

#[axum::debug_handler]
async fn panels_handler() -> Json<[InfoPanel; 3]> {
    Json(panels::consulting_panels())
}

#[axum::debug_handler]
async fn dashboard_handler(
    State(state): State<AppState>,
    Json(payload): Json<DashboardPayload>,
) -> Result<Json<DashboardView>, (StatusCode, Json<serde_json::Value>)> {
    let result = dashboard::render_cycle(
        &payload.folder_path,
        payload.selected_file.as_deref(),
        &state.summarizer,
        state.config.content_preview_chars,
    )
    .await;

    match result {
        Ok(view) => Ok(Json(view)),
        Err(e) => {
            error!("Error en el ciclo de render: {:#}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "No se pudo generar el resumen del fichero."})),
            ))
        }
    }
}

#[axum::debug_handler]
async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

// --- Handler de Apagado ---

#[axum::debug_handler]
async fn shutdown_handler(
    State(state): State<AppState>,
) -> impl IntoResponse {
    info!("Petición de apagado recibida.");
    match state.shutdown_sender.lock() {
        Ok(mut guard) => {
            if let Some(sender) = guard.take() {
                let _ = sender.send(());
            }
        }
        Err(e) => error!("No se pudo enviar la señal de apagado: {}", e),
    }
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::summarizer::{tests::FakeModel, Summarizer};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;
    use tokio::sync::oneshot;

    fn test_state() -> (AppState, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        let state = AppState {
            config: AppConfig {
                server_addr: "127.0.0.1:0".to_string(),
                default_folder: PathBuf::from("/tmp/Consulting_Data"),
                llm_summary_model: "fake".to_string(),
                summary_max_input_words: 3000,
                content_preview_chars: 5000,
            },
            summarizer: Summarizer::new(Arc::new(FakeModel::default()), 3000),
            shutdown_sender: Arc::new(Mutex::new(Some(tx))),
        };
        (state, rx)
    }

    async fn render(state: AppState, folder_path: &str, selected_file: Option<&str>) -> serde_json::Value {
        let payload = DashboardPayload {
            folder_path: folder_path.to_string(),
            selected_file: selected_file.map(str::to_string),
        };
        let Json(view) = dashboard_handler(State(state), Json(payload))
            .await
            .unwrap_or_else(|(status, _)| panic!("estado inesperado {status}"));
        serde_json::to_value(view).unwrap()
    }

    #[tokio::test]
    async fn config_exposes_default_folder_and_panels() {
        let (state, _rx) = test_state();
        let Json(config) = config_handler(State(state)).await;
        let body = serde_json::to_value(config).unwrap();

        assert_eq!(body["default_folder"], "/tmp/Consulting_Data");
        assert_eq!(body["title"], panels::DASHBOARD_TITLE);
        assert_eq!(body["panels"][2]["title"], "Industries Catered");
    }

    #[tokio::test]
    async fn dashboard_reports_missing_folder() {
        let (state, _rx) = test_state();
        let body = render(state, "/does/not/exist", None).await;

        assert_eq!(body["state"], "folder_invalid");
        assert_eq!(body["message"], "Folder path does not exist");
    }

    #[tokio::test]
    async fn dashboard_renders_selected_file() {
        let (state, _rx) = test_state();
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("report.txt"), "Hello world").unwrap();

        let body = render(state, dir.path().to_str().unwrap(), Some("report.txt")).await;

        assert_eq!(body["state"], "file_selected");
        assert_eq!(body["content"], "Hello world");
        assert_eq!(body["summary"], "Hello world");
        assert_eq!(body["selected"]["kind"]["type"], "plain_text");
        assert_eq!(body["panels"][0]["title"], "Tools Used");
    }

    #[tokio::test]
    async fn dashboard_model_failure_is_a_generic_500() {
        let (mut state, _rx) = test_state();
        state.summarizer = Summarizer::new(
            Arc::new(FakeModel {
                fail: true,
                ..Default::default()
            }),
            3000,
        );
        let dir = tempdir().unwrap();
        let long: Vec<String> = (0..120).map(|i| format!("palabra{i}")).collect();
        std::fs::write(dir.path().join("long.txt"), long.join(" ")).unwrap();

        let payload = DashboardPayload {
            folder_path: dir.path().to_string_lossy().to_string(),
            selected_file: Some("long.txt".to_string()),
        };
        let Err((status, Json(body))) = dashboard_handler(State(state), Json(payload)).await else {
            panic!("se esperaba un error");
        };
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn shutdown_fires_the_signal_once() {
        let (state, rx) = test_state();

        let response = shutdown_handler(State(state.clone())).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(rx.await.is_ok());

        let response = shutdown_handler(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn shutdown_survives_a_poisoned_lock() {
        let (state, _rx) = test_state();
        let holder = state.clone();
        let _ = std::thread::spawn(move || {
            let _guard = holder.shutdown_sender.lock().unwrap();
            panic!("envenenar el mutex");
        })
        .join();
        assert!(state.shutdown_sender.is_poisoned());

        let response = shutdown_handler(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
