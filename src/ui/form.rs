//! Registration form validation
//!
//! The only client-side rule is that both password fields match exactly.

/// Whether a submission may continue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Proceed,
    Block,
}

/// Compare the two password fields. Case-sensitive, no trimming.
pub fn validate_passwords(password: &str, confirmation: &str) -> Submission {
    if password == confirmation {
        Submission::Proceed
    } else {
        Submission::Block
    }
}

/// What the binding layer must do with a submit event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitDecision {
    /// Call `prevent_default` on the event
    pub prevent_default: bool,
    /// Show the mismatch message (`#error-password`)
    pub show_error: bool,
}

/// Submit handler for the sign-up form
#[derive(Debug, Default)]
pub struct RegistrationForm;

impl RegistrationForm {
    pub fn on_submit(&self, password: &str, confirmation: &str) -> SubmitDecision {
        match validate_passwords(password, confirmation) {
            Submission::Proceed => SubmitDecision {
                prevent_default: false,
                show_error: false,
            },
            Submission::Block => {
                tracing::debug!("Password confirmation mismatch, blocking submit");
                SubmitDecision {
                    prevent_default: true,
                    show_error: true,
                }
            }
        }
    }
}
