//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;

use crate::application::services::{MessageService, MessageServiceImpl, RoomService, RoomServiceImpl};
use crate::config::Settings;
use crate::infrastructure::database;
use crate::infrastructure::repositories::{PgMessageRepository, PgRoomRepository};
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{cors, logging};
use crate::shared::clock::SystemClock;
use crate::shared::snowflake::SnowflakeGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub room_service: Arc<dyn RoomService>,
    pub message_service: Arc<dyn MessageService>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire PostgreSQL repositories into the room and message services
    pub fn from_pool(db: PgPool, settings: Settings) -> Self {
        let snowflake = Arc::new(SnowflakeGenerator::new(
            u64::from(settings.snowflake.machine_id),
            u64::from(settings.snowflake.node_id),
        ));
        let clock = Arc::new(SystemClock);

        let room_repo = Arc::new(PgRoomRepository::new(db.clone()));
        let message_repo = Arc::new(PgMessageRepository::new(db.clone()));

        let room_service = Arc::new(RoomServiceImpl::new(
            Arc::clone(&room_repo),
            Arc::clone(&snowflake),
            clock.clone(),
        ));
        let message_service = Arc::new(MessageServiceImpl::new(
            message_repo,
            room_repo,
            snowflake,
            clock,
        ));

        Self {
            db,
            room_service,
            message_service,
            settings: Arc::new(settings),
        }
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let db = database::create_pool(&settings.database).await?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db).await?;
            tracing::info!("Database migrations applied");
        }

        let addr = settings.server.socket_addr()?;
        let cors_layer = cors::create_cors_layer(&settings.cors);
        let state = AppState::from_pool(db, settings);

        let router = routes::create_router(state).layer(
            ServiceBuilder::new()
                .layer(logging::create_trace_layer())
                .layer(cors_layer),
        );

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
