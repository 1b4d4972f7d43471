//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Printer handle could not be opened, or the device is unreachable
    #[error("Printer unavailable: {0}")]
    PrinterUnavailable(String),

    /// The raw document or page could not be started on the spooler
    #[error("Job start failed: {0}")]
    JobStartFailed(String),

    /// Write to the device failed, including partial writes
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// The OS print subsystem could not be queried
    #[error("Printer directory unavailable: {0}")]
    DirectoryUnavailable(String),

    /// The OS reports no default printer
    #[error("No default printer configured")]
    NoDefaultPrinter,

    /// Network connection error
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for the device
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid printer configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// IO error during printing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
