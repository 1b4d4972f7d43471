//! Raw spooler printing (winspool, "RAW" datatype)
//!
//! Submits a staged byte file to a named spooler queue as one RAW document.
//! The winspool resources nest: printer handle, then document, then page.
//! Each is held by a scoped guard so teardown runs in strict reverse order
//! of acquisition - the printer handle is closed even when the document or
//! page never started.

use std::path::Path;

use tracing::{info, instrument};

use crate::error::{PrintError, PrintResult};

/// Outcome of a spooler submission
#[derive(Debug, Clone, Copy)]
pub struct SpoolerJob {
    /// OS-assigned job id
    pub job_id: u32,
    /// Bytes accepted by the spooler
    pub bytes: usize,
}

/// A named spooler queue accepting RAW jobs
#[derive(Debug, Clone)]
pub struct SpoolerPrinter {
    name: String,
}

impl SpoolerPrinter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Queue name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submit a staged file as one RAW document
    ///
    /// Winspool calls are synchronous, so the submission runs on a blocking
    /// task. The file must stay alive until this returns; the caller owns
    /// its deletion.
    #[instrument(skip(self, path), fields(printer = %self.name))]
    pub async fn print_file(&self, path: &Path) -> PrintResult<SpoolerJob> {
        let printer = self.clone();
        let path = path.to_path_buf();

        let job = tokio::task::spawn_blocking(move || {
            let data = std::fs::read(&path)?;
            printer.print_blocking(&data)
        })
        .await
        .map_err(|e| PrintError::WriteFailed(format!("print task join failed: {}", e)))??;

        info!(job_id = job.job_id, bytes = job.bytes, "Raw job submitted to spooler");
        Ok(job)
    }

    /// Blocking submission through the raw print-job API
    #[cfg(windows)]
    pub fn print_blocking(&self, data: &[u8]) -> PrintResult<SpoolerJob> {
        winspool::send_raw(&self.name, "Receipt", data)
    }

    #[cfg(not(windows))]
    pub fn print_blocking(&self, _data: &[u8]) -> PrintResult<SpoolerJob> {
        Err(PrintError::PrinterUnavailable(format!(
            "spooler printing to {} is only supported on Windows",
            self.name
        )))
    }
}

/// A short write is a failed job, not a partial success
#[cfg_attr(not(windows), allow(dead_code))]
fn check_write_complete(written: usize, requested: usize) -> PrintResult<()> {
    if written != requested {
        return Err(PrintError::WriteFailed(format!(
            "partial write: {} of {} bytes",
            written, requested
        )));
    }
    Ok(())
}

#[cfg(windows)]
mod winspool {
    use core::ffi::c_void;

    use windows::Win32::Graphics::Printing::{
        ClosePrinter, DOC_INFO_1W, EndDocPrinter, EndPagePrinter, OpenPrinterW, PRINTER_HANDLE,
        StartDocPrinterW, StartPagePrinter, WritePrinter,
    };
    use windows::core::{PCWSTR, PWSTR};

    use super::SpoolerJob;
    use crate::error::{PrintError, PrintResult};

    fn to_wide(s: &str) -> Vec<u16> {
        s.encode_utf16().chain(std::iter::once(0)).collect()
    }

    fn last_error(context: &str) -> String {
        format!("{}: {}", context, windows::core::Error::from_win32())
    }

    /// Open printer handle, closed on drop
    struct PrinterGuard(PRINTER_HANDLE);

    impl PrinterGuard {
        fn open(name: &str) -> PrintResult<Self> {
            let name_w = to_wide(name);
            let mut handle = PRINTER_HANDLE::default();
            unsafe { OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None) }
                .map_err(|e| PrintError::PrinterUnavailable(format!("{}: {}", name, e)))?;
            Ok(Self(handle))
        }
    }

    impl Drop for PrinterGuard {
        fn drop(&mut self) {
            unsafe {
                let _ = ClosePrinter(self.0);
            }
        }
    }

    /// RAW document on an open printer, ended on drop
    struct DocGuard<'a> {
        printer: &'a PrinterGuard,
        job_id: u32,
    }

    impl<'a> DocGuard<'a> {
        fn start(printer: &'a PrinterGuard, doc_name: &str) -> PrintResult<Self> {
            let doc_name_w = to_wide(doc_name);
            let datatype_w = to_wide("RAW");
            let doc_info = DOC_INFO_1W {
                pDocName: PWSTR(doc_name_w.as_ptr() as *mut _),
                pOutputFile: PWSTR::null(),
                pDatatype: PWSTR(datatype_w.as_ptr() as *mut _),
            };

            let job_id = unsafe { StartDocPrinterW(printer.0, 1, &doc_info as *const DOC_INFO_1W) };
            if job_id == 0 {
                return Err(PrintError::JobStartFailed(last_error("StartDocPrinter")));
            }
            Ok(Self { printer, job_id })
        }
    }

    impl Drop for DocGuard<'_> {
        fn drop(&mut self) {
            unsafe {
                let _ = EndDocPrinter(self.printer.0);
            }
        }
    }

    /// Page within a document, ended on drop
    struct PageGuard<'a>(&'a PrinterGuard);

    impl<'a> PageGuard<'a> {
        fn start(printer: &'a PrinterGuard) -> PrintResult<Self> {
            if unsafe { !StartPagePrinter(printer.0).as_bool() } {
                return Err(PrintError::JobStartFailed(last_error("StartPagePrinter")));
            }
            Ok(Self(printer))
        }
    }

    impl Drop for PageGuard<'_> {
        fn drop(&mut self) {
            unsafe {
                let _ = EndPagePrinter(self.0.0);
            }
        }
    }

    /// Send the full buffer as one RAW document and return the OS job id
    ///
    /// Guards drop in reverse declaration order: page, document, printer.
    pub fn send_raw(name: &str, doc_name: &str, data: &[u8]) -> PrintResult<SpoolerJob> {
        let printer = PrinterGuard::open(name)?;
        let doc = DocGuard::start(&printer, doc_name)?;
        let _page = PageGuard::start(&printer)?;

        let mut written: u32 = 0;
        let ok = unsafe {
            WritePrinter(
                printer.0,
                data.as_ptr() as *const c_void,
                data.len() as u32,
                &mut written,
            )
        };

        if !ok.as_bool() {
            return Err(PrintError::WriteFailed(last_error("WritePrinter")));
        }

        super::check_write_complete(written as usize, data.len())?;

        Ok(SpoolerJob {
            job_id: doc.job_id,
            bytes: data.len(),
        })
    }
}


#[cfg(all(test, not(windows)))]
mod fallback_tests {
    use super::*;

    #[tokio::test]
    async fn spooler_unavailable_off_windows() {
        let printer = SpoolerPrinter::new("HP-LaserJet");
        let result = printer.print_blocking(b"receipt");
        assert!(matches!(result, Err(PrintError::PrinterUnavailable(_))));
    }

    #[tokio::test]
    async fn print_file_propagates_read_errors() {
        let printer = SpoolerPrinter::new("HP-LaserJet");
        let result = printer
            .print_file(Path::new("/nonexistent/job.bin"))
            .await;
        assert!(result.is_err());
    }
}
