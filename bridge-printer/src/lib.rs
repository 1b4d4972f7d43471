//! # bridge-printer
//!
//! Raw receipt printing library - low-level device access only.
//!
//! ## Scope
//!
//! This crate handles HOW bytes reach a physical printer:
//! - Windows spooler raw printing (winspool, "RAW" datatype)
//! - Printer enumeration and OS default lookup
//! - Direct-stream devices (serial ports, raw TCP port 9100)
//! - ASCII sanitization for legacy thermal firmware
//!
//! What to print (payload decoding, target selection, HTTP surface)
//! belongs to the application on top of this crate.
//!
//! ## Example
//!
//! ```ignore
//! use bridge_printer::{NetworkPrinter, Printer};
//!
//! let printer = NetworkPrinter::from_addr("192.168.1.100:9100")?;
//! printer.print(b"\x1b@RECEIPT\n\x1dV\x00").await?;
//! ```

mod directory;
mod error;
mod sanitize;
mod spooler;
mod stream;

// Re-exports
pub use directory::{PrinterDirectory, PrinterInfo, SystemDirectory};
pub use error::{PrintError, PrintResult};
pub use sanitize::sanitize_receipt_text;
pub use spooler::{SpoolerJob, SpoolerPrinter};
pub use stream::{NetworkPrinter, Printer, SerialPrinter};
