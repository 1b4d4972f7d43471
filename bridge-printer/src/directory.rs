//! Printer directory: installed printers and the OS-reported default
//!
//! Every query goes straight to the print subsystem. No caching - devices
//! appear and disappear, and the default can change in OS settings between
//! two requests.

use crate::error::{PrintError, PrintResult};

/// A printer as reported by the OS print subsystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterInfo {
    pub name: String,
    pub is_default: bool,
}

/// Directory of output devices known to the OS
pub trait PrinterDirectory: Send + Sync {
    /// List installed printers, duplicates removed, source order preserved
    fn list(&self) -> PrintResult<Vec<PrinterInfo>>;

    /// Name of the OS default printer
    fn default_printer(&self) -> PrintResult<String>;
}

/// Directory backed by winspool
///
/// Spooler enumeration only exists on Windows; elsewhere every query fails
/// with [`PrintError::DirectoryUnavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDirectory;

impl SystemDirectory {
    pub fn new() -> Self {
        Self
    }
}

impl PrinterDirectory for SystemDirectory {
    #[cfg(windows)]
    fn list(&self) -> PrintResult<Vec<PrinterInfo>> {
        let default = winspool::default_printer_name()?;
        let names = winspool::enumerate_printers()?;

        let mut result: Vec<PrinterInfo> = Vec::with_capacity(names.len());
        for name in names {
            if result.iter().any(|p| p.name == name) {
                continue;
            }
            let is_default = default.as_deref() == Some(name.as_str());
            result.push(PrinterInfo { name, is_default });
        }
        Ok(result)
    }

    #[cfg(not(windows))]
    fn list(&self) -> PrintResult<Vec<PrinterInfo>> {
        Err(PrintError::DirectoryUnavailable(
            "printer enumeration is only supported on Windows".to_string(),
        ))
    }

    #[cfg(windows)]
    fn default_printer(&self) -> PrintResult<String> {
        winspool::default_printer_name()?.ok_or(PrintError::NoDefaultPrinter)
    }

    #[cfg(not(windows))]
    fn default_printer(&self) -> PrintResult<String> {
        Err(PrintError::DirectoryUnavailable(
            "printer enumeration is only supported on Windows".to_string(),
        ))
    }
}

#[cfg(windows)]
mod winspool {
    use windows::Win32::Graphics::Printing::{
        EnumPrintersW, GetDefaultPrinterW, PRINTER_ENUM_CONNECTIONS, PRINTER_ENUM_LOCAL,
        PRINTER_INFO_5W,
    };
    use windows::core::PWSTR;

    use crate::error::{PrintError, PrintResult};

    /// Enumerate local and connected printers by name
    pub fn enumerate_printers() -> PrintResult<Vec<String>> {
        unsafe {
            let flags = PRINTER_ENUM_LOCAL | PRINTER_ENUM_CONNECTIONS;
            let mut needed: u32 = 0;
            let mut returned: u32 = 0;

            let _ = EnumPrintersW(flags, None, 5, None, &mut needed, &mut returned);

            if needed == 0 {
                return Ok(Vec::new());
            }

            let mut buf: Vec<u8> = vec![0; needed as usize];
            EnumPrintersW(
                flags,
                None,
                5,
                Some(buf.as_mut_slice()),
                &mut needed,
                &mut returned,
            )
            .map_err(|e| {
                PrintError::DirectoryUnavailable(format!("EnumPrintersW failed: {}", e))
            })?;

            let ptr = buf.as_ptr() as *const PRINTER_INFO_5W;
            let slice = std::slice::from_raw_parts(ptr, returned as usize);

            let mut result: Vec<String> = Vec::new();
            for info in slice.iter() {
                if info.pPrinterName.is_null() {
                    continue;
                }
                let name = PWSTR(info.pPrinterName.0).to_string().unwrap_or_default();
                if !name.is_empty() {
                    result.push(name);
                }
            }

            Ok(result)
        }
    }

    /// Name of the OS default printer, if one is configured
    pub fn default_printer_name() -> PrintResult<Option<String>> {
        unsafe {
            let mut needed: u32 = 0;
            let _ = GetDefaultPrinterW(None, &mut needed);

            if needed == 0 {
                return Ok(None);
            }

            let mut buf: Vec<u16> = vec![0; needed as usize];
            let ok = GetDefaultPrinterW(Some(PWSTR(buf.as_mut_ptr())), &mut needed);

            if !ok.as_bool() {
                return Ok(None);
            }

            let name = PWSTR(buf.as_mut_ptr()).to_string().map_err(|e| {
                PrintError::DirectoryUnavailable(format!("UTF-16 decode failed: {}", e))
            })?;

            Ok(Some(name))
        }
    }
}
