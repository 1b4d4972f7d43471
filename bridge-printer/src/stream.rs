//! Direct-stream printer adapters
//!
//! Devices addressed as raw byte channels instead of spooler queues:
//! serial receipt printers and network printers speaking raw TCP on
//! port 9100. Delivery is fire-and-forget - a successful write means the
//! bytes left the process, not that paper came out.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::{info, instrument, warn};

use crate::error::{PrintError, PrintResult};

/// Trait for direct-stream printer adapters
#[async_trait]
pub trait Printer: Send + Sync {
    /// Send raw bytes to the device
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Check if the device is online/reachable
    async fn is_online(&self) -> bool;
}

/// Serial receipt printer behind a persistent port handle
///
/// The port is opened once and held for the process lifetime. The mutex
/// gives every job exclusive use of the handle, so concurrent requests
/// cannot interleave bytes mid-receipt.
pub struct SerialPrinter {
    path: String,
    port: Arc<Mutex<SerialStream>>,
}

impl SerialPrinter {
    /// Open the port once; write errors surface per job
    pub fn open(path: &str, baud_rate: u32) -> PrintResult<Self> {
        let port = tokio_serial::new(path, baud_rate)
            .open_native_async()
            .map_err(|e| PrintError::Connection(format!("{}: {}", path, e)))?;

        info!(path, baud_rate, "Serial port opened");

        Ok(Self {
            path: path.to_string(),
            port: Arc::new(Mutex::new(port)),
        })
    }

    /// Device path (e.g. "COM4" or "/dev/ttyUSB0")
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl Printer for SerialPrinter {
    #[instrument(skip(self, data), fields(path = %self.path, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        let mut port = self.port.lock().await;

        port.write_all(data)
            .await
            .map_err(|e| PrintError::WriteFailed(format!("{}: {}", self.path, e)))?;
        port.flush()
            .await
            .map_err(|e| PrintError::WriteFailed(format!("{}: {}", self.path, e)))?;

        info!("Print job written to serial port");
        Ok(())
    }

    async fn is_online(&self) -> bool {
        // The handle is held open for the process lifetime; a dead device
        // shows up as a write failure on the next job.
        true
    }
}

/// Network printer (raw TCP, port 9100)
///
/// Connects per job - most thermal printers accept raw TCP printing but
/// drop idle connections, so there is no persistent handle to keep.
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    addr: SocketAddr,
    timeout: Duration,
}

impl NetworkPrinter {
    /// Create from a socket address string (e.g., "192.168.1.100:9100")
    pub fn from_addr(addr: &str) -> PrintResult<Self> {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid address: {}", addr)))?;

        Ok(Self {
            addr,
            timeout: Duration::from_secs(5),
        })
    }

    /// Set connection timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the printer address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

#[async_trait]
impl Printer for NetworkPrinter {
    #[instrument(skip(self, data), fields(addr = %self.addr, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        let stream = tokio::time::timeout(self.timeout, TcpStream::connect(self.addr))
            .await
            .map_err(|_| PrintError::Timeout(format!("Connection timeout: {}", self.addr)))?
            .map_err(|e| PrintError::Connection(format!("{}: {}", self.addr, e)))?;

        let mut stream = stream;
        stream
            .write_all(data)
            .await
            .map_err(|e| PrintError::WriteFailed(format!("{}: {}", self.addr, e)))?;
        stream.flush().await?;
        stream.shutdown().await?;

        info!("Print job sent");
        Ok(())
    }

    #[instrument(fields(addr = %self.addr))]
    async fn is_online(&self) -> bool {
        let check_timeout = Duration::from_millis(500);

        match tokio::time::timeout(check_timeout, TcpStream::connect(self.addr)).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                warn!(error = %e, "Printer offline");
                false
            }
            Err(_) => {
                warn!("Printer check timeout");
                false
            }
        }
    }
}
