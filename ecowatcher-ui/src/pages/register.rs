//! Register Page
//!
//! Account creation (`/crear_cuenta`).

use leptos::*;

use crate::components::RegisterForm;

/// Sign-up page component
#[component]
pub fn RegisterPage() -> impl IntoView {
    view! {
        <div class="register">
            <h1>"Crear cuenta"</h1>
            <p class="subtitle">"Recibe alertas cuando el eco-score baje de nivel"</p>
            <RegisterForm />
            <p class="login-link">
                "¿Ya tienes cuenta? " <a href="/login">"Inicia sesión"</a>
            </p>
        </div>
    }
}
