//! Banner/modal state machine.
//!
//! The controller never touches a DOM. It consumes [`UiEvent`]s, exposes a
//! [`ConsentView`] snapshot for the rendering layer, and asks the host to
//! persist a decision by returning it in a [`Reaction`].
//!
//! States: `Hidden` -> `BannerShown` -> (`ModalShown` | `Hidden`) -> `Hidden`.
//! Every show bumps `epoch`; a delayed [`UiEvent::Reveal`] carrying an older
//! epoch is dropped, so a reveal timer left over from a previous show cannot
//! act on the current one.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use crate::record::{Category, ConsentChoice};

/// Which piece of consent UI is on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Hidden,
    BannerShown,
    ModalShown,
}

/// Focusable controls inside the modal, in tab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    Close,
    Analytics,
    Marketing,
    Reject,
    AcceptAll,
    Save,
}

impl FocusTarget {
    pub const ORDER: [FocusTarget; 6] =
        [Self::Close, Self::Analytics, Self::Marketing, Self::Reject, Self::AcceptAll, Self::Save];

    /// Checkbox target for an optional category.
    #[must_use]
    pub fn for_category(category: Category) -> Option<Self> {
        match category {
            Category::Necessary => None,
            Category::Analytics => Some(Self::Analytics),
            Category::Marketing => Some(Self::Marketing),
        }
    }

    fn position(self) -> usize {
        Self::ORDER.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Next target in tab order, wrapping at either end.
    #[must_use]
    pub fn cycle(current: Option<Self>, backwards: bool) -> Self {
        let len = Self::ORDER.len();
        let next = match (current, backwards) {
            (None, false) => 0,
            (None, true) => len - 1,
            (Some(t), false) => (t.position() + 1) % len,
            (Some(t), true) => (t.position() + len - 1) % len,
        };
        Self::ORDER[next]
    }
}

/// Keys the controller reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Tab,
    Escape,
    Other,
}

impl Key {
    /// Map a browser `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
}

/// User or timer input to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    AcceptAll,
    RejectAll,
    ManagePreferences,
    SavePreferences,
    Toggle(Category),
    /// Modal close button.
    Close,
    /// Click on the modal backdrop.
    OverlayClick,
    Key(KeyInput),
    /// A control received focus by pointer or script.
    Focused(FocusTarget),
    /// Entry transition finished for the show identified by `epoch`.
    Reveal { epoch: u64 },
}

/// Render snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConsentView {
    pub phase: Phase,
    /// Modal checkbox state.
    pub draft: ConsentChoice,
    /// Entry transition has completed.
    pub revealed: bool,
    pub focus: Option<FocusTarget>,
    /// A decision is being persisted.
    pub saving: bool,
    pub epoch: u64,
}

impl ConsentView {
    #[must_use]
    pub fn banner_open(&self) -> bool {
        self.phase == Phase::BannerShown
    }

    #[must_use]
    pub fn modal_open(&self) -> bool {
        self.phase == Phase::ModalShown
    }

    /// Value for the modal's `aria-hidden`: hidden until shown and revealed.
    #[must_use]
    pub fn modal_aria_hidden(&self) -> bool {
        !(self.modal_open() && self.revealed)
    }
}

/// What the host must do after an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reaction {
    /// Decision to persist; report the result with
    /// [`PresentationController::complete_save`].
    pub save: Option<ConsentChoice>,
    /// The event was consumed and its default browser action should be
    /// suppressed.
    pub consumed: bool,
}

impl Reaction {
    fn save(choice: ConsentChoice) -> Self {
        Self { save: Some(choice), consumed: true }
    }

    fn consumed() -> Self {
        Self { save: None, consumed: true }
    }
}

#[derive(Debug, Default)]
pub struct PresentationController {
    view: ConsentView,
}

impl PresentationController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn view(&self) -> &ConsentView {
        &self.view
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.view.phase
    }

    /// Show the banner. Re-showing an open banner keeps it as is.
    pub fn show_banner(&mut self) {
        if self.view.phase != Phase::BannerShown {
            self.enter(Phase::BannerShown, ConsentChoice::default());
        }
    }

    /// Show the modal with checkboxes set from `prefill`.
    pub fn show_modal(&mut self, prefill: ConsentChoice) {
        if self.view.phase == Phase::ModalShown {
            return;
        }
        self.enter(Phase::ModalShown, prefill);
    }

    /// Tear down any open UI.
    pub fn hide(&mut self) {
        self.view.phase = Phase::Hidden;
        self.view.revealed = false;
        self.view.focus = None;
        self.view.saving = false;
    }

    /// Apply `event`. `stored` is the current saved choice, used to prefill
    /// the modal when preferences are opened from the banner.
    pub fn handle(&mut self, event: UiEvent, stored: Option<ConsentChoice>) -> Reaction {
        if let UiEvent::Reveal { epoch } = event {
            self.reveal(epoch);
            return Reaction::default();
        }

        match self.view.phase {
            Phase::Hidden => Reaction::default(),
            Phase::BannerShown => self.handle_banner(event, stored),
            Phase::ModalShown => self.handle_modal(event),
        }
    }

    /// Report the result of a save requested through [`Reaction::save`].
    ///
    /// A persisted decision closes the UI. A failed one leaves it open so the
    /// user can try again. Returns `false` when no save was pending, i.e. the
    /// UI was hidden or re-shown while the save ran.
    pub fn complete_save(&mut self, persisted: bool) -> bool {
        if !self.view.saving {
            return false;
        }
        self.view.saving = false;
        if persisted {
            self.hide();
        }
        true
    }

    /// Drop any open UI and pending save, then show a fresh banner.
    pub fn restart(&mut self) {
        self.hide();
        self.show_banner();
    }

    fn handle_banner(&mut self, event: UiEvent, stored: Option<ConsentChoice>) -> Reaction {
        if self.view.saving {
            return Reaction::default();
        }
        match event {
            UiEvent::AcceptAll => self.request_save(ConsentChoice::accept_all()),
            UiEvent::RejectAll => self.request_save(ConsentChoice::reject_all()),
            UiEvent::ManagePreferences => {
                self.enter(Phase::ModalShown, stored.unwrap_or_default());
                Reaction::consumed()
            }
            _ => Reaction::default(),
        }
    }

    fn handle_modal(&mut self, event: UiEvent) -> Reaction {
        match event {
            UiEvent::Key(KeyInput { key: Key::Tab, shift }) => {
                self.view.focus = Some(FocusTarget::cycle(self.view.focus, shift));
                Reaction::consumed()
            }
            UiEvent::Focused(target) => {
                self.view.focus = Some(target);
                Reaction::default()
            }
            _ if self.view.saving => Reaction::default(),
            UiEvent::Toggle(category) => {
                self.view.draft.toggle(category);
                Reaction::default()
            }
            UiEvent::SavePreferences => self.request_save(self.view.draft),
            UiEvent::AcceptAll => {
                self.view.draft = ConsentChoice::accept_all();
                self.request_save(self.view.draft)
            }
            UiEvent::RejectAll => {
                self.view.draft = ConsentChoice::reject_all();
                self.request_save(self.view.draft)
            }
            UiEvent::Close | UiEvent::OverlayClick | UiEvent::Key(KeyInput { key: Key::Escape, .. }) => {
                self.hide();
                Reaction::consumed()
            }
            _ => Reaction::default(),
        }
    }

    fn request_save(&mut self, choice: ConsentChoice) -> Reaction {
        self.view.saving = true;
        Reaction::save(choice)
    }

    fn reveal(&mut self, epoch: u64) {
        if epoch != self.view.epoch || self.view.phase == Phase::Hidden || self.view.revealed {
            return;
        }
        self.view.revealed = true;
        if self.view.phase == Phase::ModalShown && self.view.focus.is_none() {
            self.view.focus = Some(FocusTarget::ORDER[0]);
        }
    }

    fn enter(&mut self, phase: Phase, draft: ConsentChoice) {
        self.view = ConsentView {
            phase,
            draft,
            revealed: false,
            focus: None,
            saving: false,
            epoch: self.view.epoch + 1,
        };
    }
}
