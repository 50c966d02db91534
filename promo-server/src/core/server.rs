//! Server Implementation
//!
//! HTTP server startup, background job wiring and graceful shutdown.

use tracing::info;

use crate::api;
use crate::core::{BackgroundTasks, Config, ServerState, TaskKind};
use crate::db::repository::TaskRepository;
use crate::jobs;
use crate::utils::{AppError, AppResult};

pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Run with an externally initialized state (tests)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> AppResult<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let mut tasks = BackgroundTasks::new();
        let reminder_repo = TaskRepository::new(state.db.clone());
        let tz = state.config.reminder_tz;
        let shutdown_token = tasks.shutdown_token();
        tasks.spawn(
            "inventory_reminder",
            TaskKind::Periodic,
            jobs::reminder_loop(reminder_repo, tz, shutdown_token),
        );

        let app = api::build_app(state.clone());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
        info!(
            addr = %addr,
            environment = %self.config.environment,
            "promo-server listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutting down...");
            })
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        tasks.shutdown().await;
        Ok(())
    }
}
