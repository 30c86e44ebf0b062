//! Tab Switcher
//!
//! Staged panel transition: fade the active panel out, swap panels after
//! [`FADE_OUT_DELAY`], mark the new one active after [`FADE_IN_DELAY`].
//!
//! [`TabSwitcher`] is the pure state machine; [`TabGroup`] drives it with a
//! [`Scheduler`] and applies its [`PanelEffect`]s to a [`PanelView`].

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Delay between the fade-out and the panel swap
pub const FADE_OUT_DELAY: Duration = Duration::from_millis(1000);
/// Delay between the swap and marking the new panel active
pub const FADE_IN_DELAY: Duration = Duration::from_millis(50);

/// A single change to the panels or the loading indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEffect {
    ShowLoader,
    HideLoader,
    /// Opacity 0
    FadeOut(String),
    /// Remove the `active` class
    Deactivate(String),
    /// `display: none`
    Hide(String),
    /// `display: block`
    Show(String),
    /// Add the `active` class
    Activate(String),
}

/// Applies panel effects. Unknown panels or a missing loader are skipped.
pub trait PanelView {
    fn apply(&self, effect: &PanelEffect);
}

/// Runs a task once after a delay
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

/// Where a tab group is in its transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabPhase {
    Idle,
    /// Old panel fading out, swap pending
    FadingOut { from: Option<String>, to: String },
    /// New panel shown, activation pending
    FadingIn { to: String },
}

/// Result of a tab button click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The target was already active
    Ignored,
    Started,
}

/// Effects to apply now and how long to wait before the next step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub effects: Vec<PanelEffect>,
    pub wait: Option<Duration>,
    pub generation: u64,
}

/// Transition state machine for one tab group
#[derive(Debug, Clone)]
pub struct TabSwitcher {
    active: Option<String>,
    phase: TabPhase,
    generation: u64,
}

impl TabSwitcher {
    /// `active` is the panel the markup marks active, if any
    pub fn new(active: Option<String>) -> Self {
        Self {
            active,
            phase: TabPhase::Idle,
            generation: 0,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn phase(&self) -> &TabPhase {
        &self.phase
    }

    /// Start a transition to `target`; `None` when it is already active.
    ///
    /// A click during a transition supersedes it: pending steps of the old
    /// transition become no-ops.
    pub fn click(&mut self, target: &str) -> Option<Step> {
        if self.active.as_deref() == Some(target) {
            return None;
        }

        // A panel shown but not yet activated still has to be hidden
        let current = match &self.phase {
            TabPhase::FadingIn { to } if self.active.is_none() => Some(to.clone()),
            _ => self.active.clone(),
        };

        let mut effects = vec![PanelEffect::ShowLoader];
        if let Some(current) = &current {
            effects.push(PanelEffect::FadeOut(current.clone()));
        }

        self.generation += 1;
        self.phase = TabPhase::FadingOut {
            from: current,
            to: target.to_string(),
        };

        Some(Step {
            effects,
            wait: Some(FADE_OUT_DELAY),
            generation: self.generation,
        })
    }

    /// Run the pending step of transition `generation`
    pub fn advance(&mut self, generation: u64) -> Step {
        if generation != self.generation {
            return Step {
                effects: Vec::new(),
                wait: None,
                generation,
            };
        }

        match std::mem::replace(&mut self.phase, TabPhase::Idle) {
            TabPhase::Idle => Step {
                effects: Vec::new(),
                wait: None,
                generation,
            },
            TabPhase::FadingOut { from, to } => {
                let mut effects = Vec::new();
                if let Some(from) = from {
                    effects.push(PanelEffect::Deactivate(from.clone()));
                    effects.push(PanelEffect::Hide(from));
                }
                effects.push(PanelEffect::Show(to.clone()));

                self.active = None;
                self.phase = TabPhase::FadingIn { to };
                Step {
                    effects,
                    wait: Some(FADE_IN_DELAY),
                    generation,
                }
            }
            TabPhase::FadingIn { to } => {
                let effects = vec![PanelEffect::Activate(to.clone()), PanelEffect::HideLoader];
                self.active = Some(to);
                Step {
                    effects,
                    wait: None,
                    generation,
                }
            }
        }
    }
}

/// A tab group wired to a view and a scheduler
pub struct TabGroup<V: PanelView + 'static, S: Scheduler + 'static> {
    switcher: Rc<RefCell<TabSwitcher>>,
    view: Rc<V>,
    scheduler: Rc<S>,
}

impl<V: PanelView + 'static, S: Scheduler + 'static> Clone for TabGroup<V, S> {
    fn clone(&self) -> Self {
        Self {
            switcher: Rc::clone(&self.switcher),
            view: Rc::clone(&self.view),
            scheduler: Rc::clone(&self.scheduler),
        }
    }
}

impl<V: PanelView + 'static, S: Scheduler + 'static> TabGroup<V, S> {
    pub fn new(active: Option<String>, view: V, scheduler: S) -> Self {
        Self {
            switcher: Rc::new(RefCell::new(TabSwitcher::new(active))),
            view: Rc::new(view),
            scheduler: Rc::new(scheduler),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn active(&self) -> Option<String> {
        self.switcher.borrow().active().map(str::to_string)
    }

    pub fn phase(&self) -> TabPhase {
        self.switcher.borrow().phase().clone()
    }

    /// Handle a click on the button bound to panel `target`
    pub fn click(&self, target: &str) -> ClickOutcome {
        let step = self.switcher.borrow_mut().click(target);
        match step {
            Some(step) => {
                tracing::debug!(target, "Switching tab");
                self.run(step);
                ClickOutcome::Started
            }
            None => ClickOutcome::Ignored,
        }
    }

    fn run(&self, step: Step) {
        for effect in &step.effects {
            self.view.apply(effect);
        }

        if let Some(wait) = step.wait {
            let group = self.clone();
            let generation = step.generation;
            self.scheduler.schedule(
                wait,
                Box::new(move || {
                    let next = group.switcher.borrow_mut().advance(generation);
                    group.run(next);
                }),
            );
        }
    }
}

impl<S: Scheduler> Scheduler for Rc<S> {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        (**self).schedule(delay, task)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ManualScheduler;
    use super::*;

    #[derive(Default)]
    struct RecordingView {
        effects: RefCell<Vec<PanelEffect>>,
    }

    impl PanelView for RecordingView {
        fn apply(&self, effect: &PanelEffect) {
            self.effects.borrow_mut().push(effect.clone());
        }
    }

    impl RecordingView {
        fn take(&self) -> Vec<PanelEffect> {
            std::mem::take(&mut *self.effects.borrow_mut())
        }
    }

    fn group() -> (TabGroup<RecordingView, Rc<ManualScheduler>>, Rc<ManualScheduler>) {
        let scheduler = Rc::new(ManualScheduler::new());
        let group = TabGroup::new(
            Some("resumen".to_string()),
            RecordingView::default(),
            Rc::clone(&scheduler),
        );
        (group, scheduler)
    }

    fn s(id: &str) -> String {
        id.to_string()
    }

    #[test]
    fn test_clicking_active_tab_is_ignored() {
        let (group, scheduler) = group();

        assert_eq!(group.click("resumen"), ClickOutcome::Ignored);
        assert!(group.view().take().is_empty());
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(group.phase(), TabPhase::Idle);
    }

    #[test]
    fn test_staged_transition() {
        let (group, scheduler) = group();

        assert_eq!(group.click("historial"), ClickOutcome::Started);
        assert_eq!(
            group.view().take(),
            vec![PanelEffect::ShowLoader, PanelEffect::FadeOut(s("resumen"))]
        );
        assert_eq!(group.active(), Some(s("resumen")));

        // Nothing happens before the fade-out delay
        scheduler.advance(Duration::from_millis(999));
        assert!(group.view().take().is_empty());

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(
            group.view().take(),
            vec![
                PanelEffect::Deactivate(s("resumen")),
                PanelEffect::Hide(s("resumen")),
                PanelEffect::Show(s("historial")),
            ]
        );
        assert_eq!(group.active(), None);
        assert_eq!(group.phase(), TabPhase::FadingIn { to: s("historial") });

        scheduler.advance(Duration::from_millis(50));
        assert_eq!(
            group.view().take(),
            vec![PanelEffect::Activate(s("historial")), PanelEffect::HideLoader]
        );
        assert_eq!(group.active(), Some(s("historial")));
        assert_eq!(group.phase(), TabPhase::Idle);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_no_initial_active_panel() {
        let scheduler = Rc::new(ManualScheduler::new());
        let group = TabGroup::new(None, RecordingView::default(), Rc::clone(&scheduler));

        group.click("historial");
        scheduler.advance(Duration::from_millis(1050));

        assert_eq!(
            group.view().take(),
            vec![
                PanelEffect::ShowLoader,
                PanelEffect::Show(s("historial")),
                PanelEffect::Activate(s("historial")),
                PanelEffect::HideLoader,
            ]
        );
    }

    #[test]
    fn test_click_during_transition_supersedes_it() {
        let (group, scheduler) = group();

        group.click("historial");
        scheduler.advance(Duration::from_millis(500));
        group.click("tabla");
        group.view().take();

        // The first transition's swap would have fired here
        scheduler.advance(Duration::from_millis(500));
        assert!(group.view().take().is_empty());

        scheduler.advance(Duration::from_millis(550));
        assert_eq!(
            group.view().take(),
            vec![
                PanelEffect::Deactivate(s("resumen")),
                PanelEffect::Hide(s("resumen")),
                PanelEffect::Show(s("tabla")),
                PanelEffect::Activate(s("tabla")),
                PanelEffect::HideLoader,
            ]
        );
        assert_eq!(group.active(), Some(s("tabla")));
    }

    #[test]
    fn test_click_while_fading_in_hides_pending_panel() {
        let (group, scheduler) = group();

        group.click("historial");
        scheduler.advance(Duration::from_millis(1000));
        group.view().take();

        group.click("tabla");
        assert_eq!(
            group.view().take(),
            vec![PanelEffect::ShowLoader, PanelEffect::FadeOut(s("historial"))]
        );

        scheduler.advance(Duration::from_millis(1050));
        assert_eq!(group.active(), Some(s("tabla")));
    }

    #[test]
    fn test_switcher_stale_generation_is_noop() {
        let mut switcher = TabSwitcher::new(Some(s("a")));
        let first = switcher.click("b").unwrap();
        let second = switcher.click("c").unwrap();

        assert!(switcher.advance(first.generation).effects.is_empty());
        assert_eq!(switcher.advance(second.generation).wait, Some(FADE_IN_DELAY));
    }
}
