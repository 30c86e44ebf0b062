//! Score Card Component
//!
//! Summary card with the latest eco-score, its severity, trend and the
//! critical alert.

use leptos::*;

use ecowatcher::dashboard::{ScoreView, ViewEffect};

use crate::state::global::{border_style, estado_class, DashboardState};

/// Binds poller effects to the dashboard signals and the alert sound
#[derive(Clone, Copy)]
pub struct CardView {
    state: DashboardState,
    audio: NodeRef<html::Audio>,
}

impl CardView {
    pub fn new(state: DashboardState, audio: NodeRef<html::Audio>) -> Self {
        Self { state, audio }
    }

    fn play_alert(&self) {
        let Some(audio) = self.audio.get_untracked() else {
            return;
        };

        audio.set_current_time(0.0);
        match audio.play() {
            Ok(promise) => spawn_local(async move {
                // Rejected when the browser blocks autoplay
                if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    web_sys::console::warn_1(&e);
                }
            }),
            Err(e) => web_sys::console::warn_1(&e),
        }
    }
}

impl ScoreView for CardView {
    fn apply(&mut self, effect: &ViewEffect) {
        match effect {
            ViewEffect::PlayAlertSound => self.play_alert(),
            other => self.state.apply(other),
        }
    }
}

/// Summary card (`#card-principal`)
#[component]
pub fn ScoreCard(audio_ref: NodeRef<html::Audio>) -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    view! {
        <div id="card-principal" class="card" style:border=move || border_style(state.card_border.get())>
            <h2>"EcoScore actual"</h2>
            <p id="ultimo" class="eco-score">{move || state.score_text.get()}</p>

            <p id="estado" class=move || estado_class(state.severity.get())>
                {move || state.severity.get().map(|s| s.label()).unwrap_or_default()}
            </p>

            <p
                id="tendencia"
                style:color=move || state.trend.get().map(|t| t.color).unwrap_or("inherit")
            >
                {move || state.trend.get().map(|t| t.label).unwrap_or_default()}
            </p>

            <p class="recomendacion">
                {move || state.severity.get().map(|s| s.advice()).unwrap_or_default()}
            </p>

            <div
                id="alerta"
                class="alerta"
                style:display=move || if state.alert_visible.get() { "block" } else { "none" }
            >
                "⚠ Alerta: el eco-score está en nivel crítico"
            </div>

            <audio id="alerta-sound" node_ref=audio_ref src="/static/sounds/alerta.mp3" preload="auto" />

            <p class="last-refresh">
                {move || {
                    state.last_refresh.get()
                        .map(|t| format!("Actualizado: {}", t))
                        .unwrap_or_default()
                }}
            </p>
        </div>
    }
}
