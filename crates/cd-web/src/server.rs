//! HTTP server setup and startup

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use cd_core::{Config, ContactDirectory};

use crate::error::{Result, WebError};
use crate::routes::routes;
use crate::views::Views;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub directory: ContactDirectory,
    pub views: Arc<Views>,
}

impl AppState {
    /// Create state around a directory, compiling the view templates
    pub fn new(directory: ContactDirectory) -> Result<Self> {
        Ok(Self {
            directory,
            views: Arc::new(Views::new()?),
        })
    }
}

/// Build the full application router
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .merge(routes())
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Contact directory web server
pub struct WebServer {
    config: Config,
    state: AppState,
}

impl WebServer {
    /// Create a new server over an existing directory
    pub fn new(config: Config, directory: ContactDirectory) -> Result<Self> {
        Ok(Self {
            config,
            state: AppState::new(directory)?,
        })
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.config
            .bind_addr()
            .parse()
            .map_err(|e| WebError::ServerError(format!("Invalid address: {}", e)))
    }

    /// Get the router
    pub fn router(&self) -> Router {
        create_router(self.state.clone(), &self.config.server.static_dir)
    }

    /// Start the server
    pub async fn run(self) -> Result<()> {
        let addr = self.socket_addr()?;
        let app = self.router();

        info!("Contact directory listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| WebError::ServerError(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| WebError::ServerError(format!("Server error: {}", e)))?;

        Ok(())
    }
}

/// Build the directory from configuration and serve it
pub async fn start_server(config: Config) -> Result<()> {
    let directory = ContactDirectory::from_config(&config.directory).await?;
    info!(
        "Directory ready: {} contacts, page size {}",
        directory.count().await,
        directory.page_size()
    );
    WebServer::new(config, directory)?.run().await
}
