//! Target resolution: which device receives the next job

use std::sync::Arc;

use bridge_printer::{PrintError, PrinterDirectory};
use thiserror::Error;
use tracing::debug;

use crate::store::{ConfigStore, StoreError};

/// Resolver error types
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Proposed name is not in the live directory listing
    #[error("Unknown printer: {0}")]
    UnknownPrinter(String),

    /// An empty name was proposed instead of null
    #[error("Printer name must be non-empty, or null to clear the selection")]
    EmptyName,

    #[error(transparent)]
    Printer(#[from] PrintError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Decide which spooler queue receives the next job
///
/// A pinned selection always wins over the OS default, even when the
/// pinned device has since disappeared from the directory; dispatch then
/// fails with a device error instead of silently printing elsewhere.
pub fn resolve_target(
    store: &ConfigStore,
    directory: &Arc<dyn PrinterDirectory>,
) -> Result<String, ResolveError> {
    if let Some(name) = store.selected() {
        debug!(printer = %name, "Using pinned printer");
        return Ok(name);
    }

    Ok(directory.default_printer()?)
}

/// Validate and persist a proposed selection
///
/// `None` clears the pin unconditionally. A name must match an entry of
/// the live listing exactly (case-sensitive) before it is persisted.
pub fn update_selection(
    store: &ConfigStore,
    directory: &Arc<dyn PrinterDirectory>,
    proposal: Option<&str>,
) -> Result<Option<String>, ResolveError> {
    let Some(raw) = proposal else {
        store.set_selected(None)?;
        debug!("Printer selection cleared");
        return Ok(None);
    };

    let name = raw.trim();
    if name.is_empty() {
        return Err(ResolveError::EmptyName);
    }

    let listing = directory.list()?;
    if !listing.iter().any(|p| p.name == name) {
        return Err(ResolveError::UnknownPrinter(name.to_string()));
    }

    store.set_selected(Some(name))?;
    debug!(printer = %name, "Printer selection pinned");
    Ok(Some(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_printer::{PrintResult, PrinterInfo};

    struct FakeDirectory {
        printers: Vec<PrinterInfo>,
    }

    impl FakeDirectory {
        fn new(names: &[&str], default: Option<&str>) -> Arc<dyn PrinterDirectory> {
            Arc::new(Self {
                printers: names
                    .iter()
                    .map(|n| PrinterInfo {
                        name: n.to_string(),
                        is_default: Some(*n) == default,
                    })
                    .collect(),
            })
        }
    }

    impl PrinterDirectory for FakeDirectory {
        fn list(&self) -> PrintResult<Vec<PrinterInfo>> {
            Ok(self.printers.clone())
        }

        fn default_printer(&self) -> PrintResult<String> {
            self.printers
                .iter()
                .find(|p| p.is_default)
                .map(|p| p.name.clone())
                .ok_or(PrintError::NoDefaultPrinter)
        }
    }

    fn fresh_store() -> (tempfile::TempDir, ConfigStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("printer-config.json"));
        (dir, store)
    }

    #[test]
    fn falls_back_to_os_default() {
        let (_dir, store) = fresh_store();
        let directory = FakeDirectory::new(&["Alpha", "Beta"], Some("Beta"));

        assert_eq!(resolve_target(&store, &directory).unwrap(), "Beta");
    }

    #[test]
    fn pinned_wins_over_default() {
        let (_dir, store) = fresh_store();
        store.set_selected(Some("Alpha")).unwrap();
        let directory = FakeDirectory::new(&["Alpha", "Beta"], Some("Beta"));

        assert_eq!(resolve_target(&store, &directory).unwrap(), "Alpha");
    }

    #[test]
    fn stale_pin_still_wins() {
        // The pinned device vanished from the directory; resolution still
        // returns it so dispatch surfaces a clear device error downstream
        let (_dir, store) = fresh_store();
        store.set_selected(Some("Gone-Printer")).unwrap();
        let directory = FakeDirectory::new(&["Alpha"], Some("Alpha"));

        assert_eq!(resolve_target(&store, &directory).unwrap(), "Gone-Printer");
    }

    #[test]
    fn no_pin_no_default_fails() {
        let (_dir, store) = fresh_store();
        let directory = FakeDirectory::new(&["Alpha"], None);

        assert!(matches!(
            resolve_target(&store, &directory),
            Err(ResolveError::Printer(PrintError::NoDefaultPrinter))
        ));
    }

    #[test]
    fn unknown_name_is_rejected() {
        let (_dir, store) = fresh_store();
        let directory = FakeDirectory::new(&["Alpha"], Some("Alpha"));

        let result = update_selection(&store, &directory, Some("Beta"));
        assert!(matches!(result, Err(ResolveError::UnknownPrinter(_))));
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn name_match_is_case_sensitive() {
        let (_dir, store) = fresh_store();
        let directory = FakeDirectory::new(&["Alpha"], Some("Alpha"));

        assert!(matches!(
            update_selection(&store, &directory, Some("alpha")),
            Err(ResolveError::UnknownPrinter(_))
        ));
    }

    #[test]
    fn empty_name_is_rejected() {
        let (_dir, store) = fresh_store();
        let directory = FakeDirectory::new(&["Alpha"], Some("Alpha"));

        assert!(matches!(
            update_selection(&store, &directory, Some("  ")),
            Err(ResolveError::EmptyName)
        ));
    }

    #[test]
    fn null_clears_unconditionally() {
        let (_dir, store) = fresh_store();
        store.set_selected(Some("Alpha")).unwrap();
        // Directory is unavailable; clearing must still succeed
        let directory = FakeDirectory::new(&[], None);

        assert_eq!(update_selection(&store, &directory, None).unwrap(), None);
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn valid_name_is_persisted() {
        let (_dir, store) = fresh_store();
        let directory = FakeDirectory::new(&["Alpha", "Beta"], Some("Alpha"));

        let result = update_selection(&store, &directory, Some("Beta")).unwrap();
        assert_eq!(result, Some("Beta".to_string()));
        assert_eq!(store.selected(), Some("Beta".to_string()));
    }
}
