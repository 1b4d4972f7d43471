//! Receipt Bridge Server - local HTTPS relay between a browser ERP and a
//! physical receipt printer
//!
//! # Architecture
//!
//! The browser cannot reach local hardware, so it POSTs base64 receipt
//! payloads to this process over TLS; the bridge decodes the bytes, picks
//! the target device and pushes them through the OS raw-printing primitive
//! or a direct byte-stream device.
//!
//! # Module structure
//!
//! ```text
//! bridge-server/src/
//! ├── core/       # Config, state, HTTPS server
//! ├── api/        # HTTP routes and handlers
//! ├── store.rs    # Persisted printer selection
//! ├── resolver.rs # Pinned-vs-default target resolution
//! ├── payload.rs  # Base64 payload decoding
//! ├── dispatch.rs # Decode -> resolve -> stage -> dispatch orchestration
//! └── utils/      # Errors, logging
//! ```

pub mod api;
pub mod core;
pub mod dispatch;
pub mod payload;
pub mod resolver;
pub mod store;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, DeviceChannel, PrintMode, Server, ServerState};
pub use store::{ConfigStore, PrinterConfig};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging from the environment
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
    ____       _     __
   / __ )_____(_)___/ /___ ____
  / __  / ___/ / __  / __ `/ _ \
 / /_/ / /  / / /_/ / /_/ /  __/
/_____/_/  /_/\__,_/\__, /\___/
                   /____/
    "#
    );
}
