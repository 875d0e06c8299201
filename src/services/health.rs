use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::database::connection::DatabaseManager;
use crate::scheduler::job_store::JobStore;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub database: DatabaseHealth,
    pub scheduler: SchedulerHealth,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseHealth {
    pub status: String,
    pub response_time_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SchedulerHealth {
    /// Jobs currently registered with the runner; includes one-shots that
    /// fired since the last daily refresh.
    pub registered_jobs: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseManager>,
    pub jobs: Arc<JobStore>,
    pub start_time: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(db: Arc<DatabaseManager>, jobs: Arc<JobStore>) -> Self {
        let state = AppState {
            db,
            jobs,
            start_time: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/health/ready", get(readiness_check))
            .route("/health/live", get(liveness_check))
            .with_state(state);

        Self { router }
    }
}

async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, StatusCode> {
    let start = std::time::Instant::now();

    let db_ok = state.db.ping().await.is_ok();
    let response_time_ms = start.elapsed().as_millis() as u64;

    let uptime = Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    let response = HealthResponse {
        status: if db_ok { "healthy" } else { "unhealthy" }.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: DatabaseHealth {
            status: if db_ok { "healthy" } else { "unhealthy" }.to_string(),
            response_time_ms,
        },
        scheduler: SchedulerHealth {
            registered_jobs: state.jobs.count().await,
        },
        uptime_seconds: uptime,
    };

    if db_ok {
        Ok(Json(response))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

async fn readiness_check(State(state): State<AppState>) -> Result<Json<&'static str>, StatusCode> {
    match state.db.ping().await {
        Ok(()) => Ok(Json("ready")),
        Err(_) => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}

async fn liveness_check() -> Json<&'static str> {
    Json("alive")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use axum_test::TestServer;
    use tempfile::TempDir;

    async fn create_test_health_service() -> (HealthService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let db = Arc::new(DatabaseManager::new(&db_url).await.unwrap());
        db.run_migrations().await.unwrap();

        let jobs = Arc::new(JobStore::new().await.unwrap());

        (HealthService::new(db, jobs), temp_dir)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (service, _temp_dir) = create_test_health_service().await;
        let server = TestServer::new(service.router).unwrap();

        let response = server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.database.status, "healthy");
        assert_eq!(body.scheduler.registered_jobs, 0);
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_readiness_endpoint() {
        let (service, _temp_dir) = create_test_health_service().await;
        let server = TestServer::new(service.router).unwrap();

        let response = server.get("/health/ready").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: String = response.json();
        assert_eq!(body, "ready");
    }

    #[tokio::test]
    async fn test_liveness_endpoint() {
        let (service, _temp_dir) = create_test_health_service().await;
        let server = TestServer::new(service.router).unwrap();

        let response = server.get("/health/live").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: String = response.json();
        assert_eq!(body, "alive");
    }
}
