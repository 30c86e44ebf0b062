//! Modal Controller
//!
//! Opens and closes the score-table dialog. A missing dialog or a dialog
//! call that throws is reported, never raised.

use thiserror::Error;

/// Failure reported by a dialog implementation
#[derive(Error, Debug, Clone, PartialEq)]
#[error("dialog call failed: {0}")]
pub struct DialogError(pub String);

/// A modal dialog element
pub trait Dialog {
    fn show_modal(&self) -> Result<(), DialogError>;
    fn close(&self) -> Result<(), DialogError>;
}

/// Result of an open or close request
#[derive(Debug, Clone, PartialEq)]
pub enum ModalOutcome {
    Shown,
    Closed,
    /// No dialog bound
    Missing,
    /// The dialog call failed and was swallowed
    Failed(DialogError),
}

/// Open/close controller for an optional dialog
pub struct ModalController<D: Dialog> {
    dialog: Option<D>,
}

impl<D: Dialog> ModalController<D> {
    pub fn new(dialog: Option<D>) -> Self {
        Self { dialog }
    }

    pub fn open(&self) -> ModalOutcome {
        self.call(D::show_modal, ModalOutcome::Shown)
    }

    pub fn close(&self) -> ModalOutcome {
        self.call(D::close, ModalOutcome::Closed)
    }

    fn call(&self, f: fn(&D) -> Result<(), DialogError>, ok: ModalOutcome) -> ModalOutcome {
        let Some(dialog) = &self.dialog else {
            tracing::debug!("No dialog bound, ignoring");
            return ModalOutcome::Missing;
        };

        match f(dialog) {
            Ok(()) => ok,
            Err(e) => {
                tracing::debug!("{}", e);
                ModalOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Dialog that behaves like `<dialog>`: show on an open dialog throws
    #[derive(Default)]
    struct FakeDialog {
        open: Cell<bool>,
        unsupported: bool,
    }

    impl Dialog for FakeDialog {
        fn show_modal(&self) -> Result<(), DialogError> {
            if self.unsupported {
                return Err(DialogError("showModal is not a function".to_string()));
            }
            if self.open.get() {
                return Err(DialogError("InvalidStateError".to_string()));
            }
            self.open.set(true);
            Ok(())
        }

        fn close(&self) -> Result<(), DialogError> {
            if self.unsupported {
                return Err(DialogError("close is not a function".to_string()));
            }
            self.open.set(false);
            Ok(())
        }
    }

    #[test]
    fn test_open_and_close() {
        let modal = ModalController::new(Some(FakeDialog::default()));
        assert_eq!(modal.open(), ModalOutcome::Shown);
        assert_eq!(modal.close(), ModalOutcome::Closed);
        // Closing twice is harmless
        assert_eq!(modal.close(), ModalOutcome::Closed);
    }

    #[test]
    fn test_missing_dialog_is_noop() {
        let modal: ModalController<FakeDialog> = ModalController::new(None);
        assert_eq!(modal.open(), ModalOutcome::Missing);
        assert_eq!(modal.close(), ModalOutcome::Missing);
    }

    #[test]
    fn test_throwing_dialog_never_escapes() {
        let modal = ModalController::new(Some(FakeDialog {
            unsupported: true,
            ..Default::default()
        }));

        for _ in 0..3 {
            assert!(matches!(modal.open(), ModalOutcome::Failed(_)));
            assert!(matches!(modal.close(), ModalOutcome::Failed(_)));
        }
    }

    #[test]
    fn test_double_open_is_reported() {
        let modal = ModalController::new(Some(FakeDialog::default()));
        assert_eq!(modal.open(), ModalOutcome::Shown);
        assert_eq!(
            modal.open(),
            ModalOutcome::Failed(DialogError("InvalidStateError".to_string()))
        );
    }
}
