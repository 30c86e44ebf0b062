//! Page Widgets
//!
//! Event handlers for the dashboard page that do not depend on the backend:
//! the score-table modal, the sign-up form check, tab transitions and the
//! score-band table.

pub mod form;
pub mod modal;
pub mod table;
pub mod tabs;

pub use form::{validate_passwords, RegistrationForm, SubmitDecision, Submission};
pub use modal::{Dialog, DialogError, ModalController, ModalOutcome};
pub use table::{populate, populate_json, render_html, TableBody, TableCell, TableError};
pub use tabs::{
    ClickOutcome, PanelEffect, PanelView, Scheduler, TabGroup, TabPhase,
    TabSwitcher, FADE_IN_DELAY, FADE_OUT_DELAY,
};
