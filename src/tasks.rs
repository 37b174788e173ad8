use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::store::{Task, TaskStatus, TaskStore};

/// Shared handler state. The store is constructed by the caller and injected
/// here so tests can build isolated routers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<TaskStore>>,
}

impl AppState {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

// === Request/Response Types ===

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Update bodies carry the status as a raw string so membership in the
/// closed set is checked here at the boundary, not by serde.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Task not found")),
    )
}

fn bad_request(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

/// Task API routes. The literal `/health` segment takes precedence over
/// the `:id` capture.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/health", get(health_check))
        .route(
            "/api/tasks/:id",
            get(get_task).put(update_task).delete(delete_task),
        )
        .with_state(state)
}

// === API Handlers ===

async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    let store = state.store.lock().await;
    Json(store.list())
}

async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Task>, ApiError> {
    let store = state.store.lock().await;
    match store.get(id) {
        Some(task) => Ok(Json(task.clone())),
        None => Err(not_found()),
    }
}

async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let title = match req.title {
        Some(title) => title,
        None => return Err(bad_request("Title is required")),
    };

    let task = Task::new(title, req.description.unwrap_or_default());

    let mut store = state.store.lock().await;
    let stored = store.add(task);
    tracing::info!("Created task {}", stored.id);

    Ok((StatusCode::CREATED, Json(stored)))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    // Validate the status up front so a rejected update leaves the task
    // fully unchanged, including title/description from the same body.
    let status = match req.status.as_deref() {
        Some(raw) => match TaskStatus::parse(raw) {
            Some(status) => Some(status),
            None => return Err(bad_request("Invalid status")),
        },
        None => None,
    };

    let mut store = state.store.lock().await;
    let task = store.get_mut(id).ok_or_else(not_found)?;

    if let Some(title) = req.title {
        task.title = title;
    }
    if let Some(description) = req.description {
        task.description = description;
    }
    if let Some(status) = status {
        task.set_status(status);
    }

    Ok(Json(task.clone()))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.lock().await;
    if store.delete(id) {
        tracing::info!("Deleted task {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "task-api",
    })
}
