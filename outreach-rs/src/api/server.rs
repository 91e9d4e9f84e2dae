//! API Server - HTTP server for the outreach REST API

use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::{self, AppState};
use crate::audit::AuditLog;
use crate::delivery::MailTransport;
use crate::dispatch::Dispatcher;
use crate::drafts::DraftStore;
use crate::registry::OrganizationRegistry;

/// API Server configuration
pub struct ApiServer {
    state: Arc<AppState>,
    addr: String,
}

impl ApiServer {
    /// Create a server with empty stores
    pub fn new(transport: Arc<dyn MailTransport>, addr: String) -> Self {
        let registry = Arc::new(OrganizationRegistry::new());
        let drafts = Arc::new(DraftStore::new());
        let audit = Arc::new(AuditLog::new());

        info!("Using {} transport", transport.name());
        let dispatcher = Arc::new(Dispatcher::new(
            registry.clone(),
            drafts.clone(),
            audit.clone(),
            transport,
        ));

        let state = Arc::new(AppState {
            registry,
            drafts,
            audit,
            dispatcher,
        });

        Self { state, addr }
    }

    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route(
                "/nonprofits",
                get(handlers::list_nonprofits).post(handlers::create_nonprofits),
            )
            .route("/send_emails", post(handlers::send_emails))
            .route("/drafts", post(handlers::create_draft))
            .route(
                "/drafts/:id",
                get(handlers::get_draft).put(handlers::update_draft),
            )
            .route("/drafts/:id/send", post(handlers::send_draft))
            .route("/emails", get(handlers::list_emails))
            .route("/emails/:address", get(handlers::list_emails_for))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the API server and run until `shutdown` resolves
    pub async fn run<F>(&self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.router();

        info!("Starting API server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("API server stopped");
        Ok(())
    }
}
