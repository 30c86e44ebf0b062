//! Tabs Component
//!
//! Tab buttons and panels driven by the core tab switcher, with gloo timers
//! for the fade delays.

use gloo_timers::callback::Timeout;
use leptos::*;
use std::collections::HashMap;
use std::time::Duration;

use ecowatcher::ui::{PanelEffect, PanelView, Scheduler, TabGroup};

/// Schedules tasks on browser timeouts
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        Timeout::new(delay.as_millis() as u32, task).forget();
    }
}

/// Inline presentation of one `.tab-content` panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelStyle {
    pub displayed: bool,
    pub faded: bool,
    pub active: bool,
}

impl PanelStyle {
    fn initial(active: bool) -> Self {
        Self {
            displayed: active,
            faded: false,
            active,
        }
    }

    /// Apply an effect aimed at this panel
    pub fn apply(&mut self, effect: &PanelEffect) {
        match effect {
            PanelEffect::FadeOut(_) => self.faded = true,
            PanelEffect::Deactivate(_) => self.active = false,
            PanelEffect::Hide(_) => self.displayed = false,
            PanelEffect::Show(_) => self.displayed = true,
            PanelEffect::Activate(_) => {
                self.active = true;
                self.faded = false;
            }
            PanelEffect::ShowLoader | PanelEffect::HideLoader => {}
        }
    }

    pub fn class(&self) -> &'static str {
        if self.active {
            "tab-content active"
        } else {
            "tab-content"
        }
    }

    pub fn style(&self) -> String {
        format!(
            "display: {}; opacity: {}",
            if self.displayed { "block" } else { "none" },
            if self.faded { 0 } else { 1 }
        )
    }
}

/// Panel this effect targets, if any
fn target(effect: &PanelEffect) -> Option<&str> {
    match effect {
        PanelEffect::FadeOut(id)
        | PanelEffect::Deactivate(id)
        | PanelEffect::Hide(id)
        | PanelEffect::Show(id)
        | PanelEffect::Activate(id) => Some(id),
        PanelEffect::ShowLoader | PanelEffect::HideLoader => None,
    }
}

/// Panel styles and the `#loader` flag as signals
#[derive(Clone, Copy)]
pub struct SignalPanelView {
    panels: RwSignal<HashMap<String, PanelStyle>>,
    loader: RwSignal<bool>,
}

impl SignalPanelView {
    pub fn new(ids: &[&str], active: &str) -> Self {
        let panels = ids
            .iter()
            .map(|id| (id.to_string(), PanelStyle::initial(*id == active)))
            .collect();

        Self {
            panels: create_rw_signal(panels),
            loader: create_rw_signal(false),
        }
    }

    pub fn panel(&self, id: &str) -> PanelStyle {
        self.panels
            .with(|panels| panels.get(id).copied())
            .unwrap_or(PanelStyle::initial(false))
    }

    pub fn loading(&self) -> bool {
        self.loader.get()
    }
}

impl PanelView for SignalPanelView {
    fn apply(&self, effect: &PanelEffect) {
        match effect {
            PanelEffect::ShowLoader => self.loader.set(true),
            PanelEffect::HideLoader => self.loader.set(false),
            _ => {
                let Some(id) = target(effect) else { return };
                self.panels.update(|panels| {
                    if let Some(style) = panels.get_mut(id) {
                        style.apply(effect);
                    }
                });
            }
        }
    }
}

pub type Tabs = TabGroup<SignalPanelView, GlooScheduler>;

/// `.tab-buttons` row and the `#loader` indicator
#[component]
pub fn TabButtons(tabs: Tabs, panels: SignalPanelView, buttons: &'static [(&'static str, &'static str)]) -> impl IntoView {
    view! {
        <div class="tab-buttons">
            {buttons
                .iter()
                .map(|(id, label)| {
                    let tabs = tabs.clone();
                    view! {
                        <button
                            data-tab=*id
                            class:selected=move || panels.panel(id).active
                            on:click=move |_| {
                                tabs.click(id);
                            }
                        >
                            {*label}
                        </button>
                    }
                })
                .collect_view()}
        </div>

        <div id="loader" class=move || if panels.loading() { "loader show" } else { "loader" } />
    }
}
