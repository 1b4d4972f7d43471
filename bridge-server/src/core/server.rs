//! HTTPS server startup and shutdown

use std::net::SocketAddr;
use std::time::Duration;

use axum_server::tls_rustls::RustlsConfig;

use crate::core::{Config, ServerState};
use crate::utils::AppError;

/// HTTPS server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> Result<(), AppError> {
        // TLS material is supplied as files; generation/rotation is out of
        // scope for this process
        let tls_config = RustlsConfig::from_pem_file(
            &self.config.tls_cert_path,
            &self.config.tls_key_path,
        )
        .await
        .map_err(|e| {
            AppError::internal(format!(
                "Failed to load TLS material from {}: {}",
                self.config.tls_cert_path.display(),
                e
            ))
        })?;

        let app = crate::api::build_app(self.state.clone());

        let ip: [u8; 4] = if self.config.bind_all {
            [0, 0, 0, 0]
        } else {
            [127, 0, 0, 1]
        };
        let addr = SocketAddr::from((ip, self.config.http_port));
        tracing::info!("Starting HTTPS server on https://{}", addr);
        tracing::info!("Printer selection UI on https://{}/ui", addr);

        self.state.log_printer_status();

        let handle = axum_server::Handle::new();

        let handle_clone = handle.clone();
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
            handle_clone.graceful_shutdown(Some(Duration::from_secs(10)));
        });

        axum_server::bind_rustls(addr, tls_config)
            .handle(handle)
            .serve(app.into_make_service())
            .await
            .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}
