//! Server configuration
//!
//! Everything comes from the environment with workable defaults; a `.env`
//! next to the binary is loaded at startup.

use std::path::PathBuf;

/// Which delivery strategy moves bytes to the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintMode {
    /// Windows spooler raw printing to a resolved queue name
    Spooler,
    /// Persistent serial port
    Serial { path: String, baud_rate: u32 },
    /// Raw TCP printer (host:port)
    Network { addr: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding printer-config.json and the staging area
    pub work_dir: PathBuf,
    pub http_port: u16,
    /// Bind all interfaces instead of loopback only
    pub bind_all: bool,
    pub tls_cert_path: PathBuf,
    pub tls_key_path: PathBuf,
    /// Exact allowed origin for the ERP; None or "*" means permissive
    pub cors_origin: Option<String>,
    pub print_mode: PrintMode,
    /// Upper bound on a single dispatch, hung devices included
    pub dispatch_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        let work_dir = PathBuf::from(std::env::var("WORK_DIR").unwrap_or_else(|_| ".".into()));

        let print_mode = match std::env::var("PRINT_MODE").as_deref() {
            Ok("serial") => PrintMode::Serial {
                path: std::env::var("SERIAL_PATH").unwrap_or_else(|_| "COM4".into()),
                baud_rate: std::env::var("SERIAL_BAUD")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(9600),
            },
            Ok("network") => PrintMode::Network {
                addr: std::env::var("PRINTER_ADDR")
                    .unwrap_or_else(|_| "192.168.1.100:9100".into()),
            },
            _ => PrintMode::Spooler,
        };

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(9100),
            bind_all: std::env::var("BIND_ALL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            tls_cert_path: std::env::var("TLS_CERT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| work_dir.join("certs/cert.pem")),
            tls_key_path: std::env::var("TLS_KEY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| work_dir.join("certs/key.pem")),
            cors_origin: std::env::var("CORS_ORIGIN").ok().filter(|v| !v.is_empty()),
            print_mode,
            dispatch_timeout_ms: std::env::var("DISPATCH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            work_dir,
        }
    }

    /// Path of the persisted printer selection record
    pub fn config_path(&self) -> PathBuf {
        self.work_dir.join("printer-config.json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
