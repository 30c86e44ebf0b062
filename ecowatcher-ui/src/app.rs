//! App Root Component
//!
//! Picks the page for the current path and provides global state.

use leptos::*;

use crate::pages::{DashboardPage, RegisterPage};
use crate::state::global::provide_dashboard_state;

/// Path of the sign-up page
pub const REGISTER_PATH: &str = "/crear_cuenta";

/// Pages the bundle can mount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Register,
}

impl Page {
    /// Page served at `path`; anything unknown gets the dashboard
    pub fn for_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            REGISTER_PATH => Page::Register,
            _ => Page::Dashboard,
        }
    }
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_default()
}

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide dashboard state to all components
    provide_dashboard_state();

    view! {
        <main class="container">
            {match Page::for_path(&current_path()) {
                Page::Register => view! { <RegisterPage /> }.into_view(),
                Page::Dashboard => view! { <DashboardPage /> }.into_view(),
            }}
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_for_path() {
        assert_eq!(Page::for_path("/crear_cuenta"), Page::Register);
        assert_eq!(Page::for_path("/crear_cuenta/"), Page::Register);
        assert_eq!(Page::for_path("/"), Page::Dashboard);
        assert_eq!(Page::for_path(""), Page::Dashboard);
        assert_eq!(Page::for_path("/dashboard"), Page::Dashboard);
    }
}
