//! Register Form Component
//!
//! Sign-up form; blocks submission while the two password fields differ.

use leptos::*;

use ecowatcher::ui::RegistrationForm;

/// Sign-up form (`#form-registro`), posted to the backend when valid
#[component]
pub fn RegisterForm() -> impl IntoView {
    let password = create_rw_signal(String::new());
    let confirmation = create_rw_signal(String::new());
    let show_error = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        let decision = RegistrationForm.on_submit(&password.get_untracked(), &confirmation.get_untracked());
        if decision.prevent_default {
            ev.prevent_default();
        }
        show_error.set(decision.show_error);
    };

    view! {
        <form id="form-registro" class="form-registro" method="post" action="/crear_cuenta" on:submit=on_submit>
            <label for="nombre">"Nombre"</label>
            <input type="text" id="nombre" name="nombre" required />

            <label for="correo">"Correo"</label>
            <input type="email" id="correo" name="correo" required />

            <label for="contraseña">"Contraseña"</label>
            <input
                type="password"
                id="contraseña"
                name="contraseña"
                required
                on:input=move |ev| password.set(event_target_value(&ev))
            />

            <label for="confirmar_contraseña">"Confirmar contraseña"</label>
            <input
                type="password"
                id="confirmar_contraseña"
                name="confirmar_contraseña"
                required
                on:input=move |ev| confirmation.set(event_target_value(&ev))
            />

            <p
                id="error-password"
                class="error"
                style:display=move || if show_error.get() { "block" } else { "none" }
            >
                "Las contraseñas no coinciden"
            </p>

            <button type="submit">"Crear cuenta"</button>
        </form>
    }
}
