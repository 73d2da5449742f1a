//! Server state and HTTP listener.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::ServerConfig;
use crate::scaffold::{ProjectGenerator, TemplateGenerator};
use crate::store::{MemoryStore, ProjectStore};
use crate::sweeper;

/// Shared state accessible by all request handlers.
pub struct SharedState {
    pub config: ServerConfig,
    /// Built projects, keyed by project id.
    pub store: Arc<dyn ProjectStore>,
    /// Prompt → source files.
    pub generator: Arc<dyn ProjectGenerator>,
    pub started_at: Instant,
}

pub struct Server {
    config: ServerConfig,
    store: Arc<dyn ProjectStore>,
    generator: Arc<dyn ProjectGenerator>,
}

impl Server {
    /// Server with an in-memory store and the template generator.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            store: Arc::new(MemoryStore::new()),
            generator: Arc::new(TemplateGenerator),
        }
    }

    pub fn with_store(mut self, store: Arc<dyn ProjectStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_generator(mut self, generator: Arc<dyn ProjectGenerator>) -> Self {
        self.generator = generator;
        self
    }

    fn build_state(&self) -> Arc<SharedState> {
        Arc::new(SharedState {
            config: self.config.clone(),
            store: Arc::clone(&self.store),
            generator: Arc::clone(&self.generator),
            started_at: Instant::now(),
        })
    }

    fn spawn_sweeper(&self) -> Option<JoinHandle<()>> {
        let interval = self.config.sweep_interval()?;
        tracing::info!("Background sweep every {}s", interval.as_secs());
        Some(sweeper::spawn(
            Arc::clone(&self.store),
            interval,
            self.config.max_age_ms(),
        ))
    }

    /// Run until ctrl-c.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.listen_addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.config.listen_addr))?;
        tracing::info!("HTTP listener on {}", listener.local_addr()?);

        let state = self.build_state();
        let sweeper = self.spawn_sweeper();
        let router = crate::web::router(state);

        let result = axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down");
            })
            .await
            .context("HTTP server error");

        if let Some(handle) = sweeper {
            handle.abort();
        }
        result
    }

    /// Start the server in the background (for testing).
    /// Returns the bound address and the serve task.
    pub async fn start(self) -> Result<(SocketAddr, JoinHandle<Result<()>>)> {
        let listener = TcpListener::bind(&self.config.listen_addr).await?;
        let addr = listener.local_addr()?;
        tracing::info!("Listening on {addr}");

        let state = self.build_state();
        let sweeper = self.spawn_sweeper();
        let router = crate::web::router(state);

        let handle = tokio::spawn(async move {
            let result = axum::serve(listener, router).await.context("HTTP server error");
            if let Some(handle) = sweeper {
                handle.abort();
            }
            result
        });

        Ok((addr, handle))
    }
}
