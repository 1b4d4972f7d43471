//! Server state shared by request handlers

use std::sync::Arc;

use bridge_printer::{NetworkPrinter, Printer, PrinterDirectory, SerialPrinter, SystemDirectory};

use crate::core::config::{Config, PrintMode};
use crate::store::ConfigStore;
use crate::utils::AppError;

/// The device channel bytes are dispatched through
///
/// Spooler mode resolves a queue name per job (pinned or OS default);
/// stream mode holds one device for the process lifetime.
#[derive(Clone)]
pub enum DeviceChannel {
    Spooler,
    Stream {
        label: String,
        printer: Arc<dyn Printer>,
        /// Fold payloads to single-byte ASCII before writing. Set for
        /// serial devices whose legacy firmware cannot render multi-byte
        /// encodings; network thermal printers take the bytes as-is.
        fold_ascii: bool,
    },
}

/// Shared server state - cheap to clone, services behind Arc
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: ConfigStore,
    pub directory: Arc<dyn PrinterDirectory>,
    pub device: DeviceChannel,
}

impl ServerState {
    /// Build the state from config, opening the direct-stream device when
    /// one is configured. A serial port that cannot be opened is fatal at
    /// startup rather than at the first print.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let device = match &config.print_mode {
            PrintMode::Spooler => DeviceChannel::Spooler,
            PrintMode::Serial { path, baud_rate } => {
                let printer = SerialPrinter::open(path, *baud_rate)
                    .map_err(|e| AppError::internal(format!("Failed to open serial port: {}", e)))?;
                DeviceChannel::Stream {
                    label: path.clone(),
                    printer: Arc::new(printer),
                    fold_ascii: true,
                }
            }
            PrintMode::Network { addr } => {
                let printer = NetworkPrinter::from_addr(addr)
                    .map_err(|e| AppError::internal(format!("Invalid printer address: {}", e)))?;
                DeviceChannel::Stream {
                    label: addr.clone(),
                    printer: Arc::new(printer),
                    fold_ascii: false,
                }
            }
        };

        Ok(Self {
            config: config.clone(),
            store: ConfigStore::new(config.config_path()),
            directory: Arc::new(SystemDirectory::new()),
            device,
        })
    }

    /// Construct from explicit parts (tests, embedded use)
    pub fn with_parts(
        config: Config,
        store: ConfigStore,
        directory: Arc<dyn PrinterDirectory>,
        device: DeviceChannel,
    ) -> Self {
        Self {
            config,
            store,
            directory,
            device,
        }
    }

    /// Log the effective printer situation at startup
    pub fn log_printer_status(&self) {
        match &self.device {
            DeviceChannel::Spooler => {
                match self.directory.default_printer() {
                    Ok(name) => tracing::info!("OS default printer: {}", name),
                    Err(e) => tracing::warn!("OS default printer: {}", e),
                }
                match self.store.selected() {
                    Some(name) => tracing::info!("Pinned printer: {}", name),
                    None => tracing::info!("Pinned printer: (none)"),
                }
            }
            DeviceChannel::Stream { label, .. } => {
                tracing::info!("Direct-stream device: {}", label);
            }
        }
    }
}
