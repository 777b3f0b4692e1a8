//! Page-lifetime consent service: the public API handed to page code.
//!
//! DESIGN
//! ======
//! One explicitly constructed instance per page, owning the store, the
//! broadcaster, and the controller. Host code receives it by injection (the
//! widget puts a handle in Leptos context) rather than through a global.
//!
//! Persistence is asynchronous and lives outside `&mut self`: `dispatch`
//! returns the choice to save, the host awaits
//! [`ConsentStore::save_consent`] on a clone of [`Self::store`], then feeds
//! the outcome back through [`Self::complete_save`].

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;

use std::time::Duration;

use crate::broadcast::{Broadcaster, ConsentSignal, SubscriptionId};
use crate::controller::{ConsentView, Phase, PresentationController, Reaction, UiEvent};
use crate::record::{Category, ConsentRecord};
use crate::storage::StorageTier;
use crate::store::{ConsentStore, SaveOutcome};

/// What [`ConsentService::boot`] decided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Boot {
    /// A valid decision was found and its signals have fired.
    Replayed(ConsentRecord),
    /// No decision yet. Call [`ConsentService::recheck`] after this delay.
    Recheck(Duration),
}

pub struct ConsentService<P, F> {
    store: ConsentStore<P, F>,
    broadcaster: Broadcaster,
    controller: PresentationController,
}

impl<P: StorageTier, F: StorageTier> ConsentService<P, F> {
    pub fn new(store: ConsentStore<P, F>) -> Self {
        Self { store, broadcaster: Broadcaster::new(), controller: PresentationController::new() }
    }

    pub fn store(&self) -> &ConsentStore<P, F> {
        &self.store
    }

    /// Current render snapshot.
    pub fn view(&self) -> ConsentView {
        self.controller.view().clone()
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn subscribe(&mut self, category: Category, listener: impl Fn(ConsentSignal<'_>) + 'static) -> SubscriptionId {
        self.broadcaster.subscribe(category, listener)
    }

    pub fn subscribe_all(&mut self, listener: impl Fn(ConsentSignal<'_>) + 'static) -> SubscriptionId {
        self.broadcaster.subscribe_all(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.broadcaster.unsubscribe(id)
    }

    pub fn has_consent(&self) -> bool {
        self.store.has_consent()
    }

    pub fn is_category_allowed(&self, category: &str) -> bool {
        self.store.is_category_allowed(category)
    }

    pub fn get_consent(&self) -> Option<ConsentRecord> {
        self.store.get_consent()
    }

    /// First look at storage on page load.
    pub fn boot(&mut self) -> Boot {
        match self.store.get_consent() {
            Some(record) => {
                log::info!("consent: replaying stored decision");
                self.broadcaster.announce(&record);
                Boot::Replayed(record)
            }
            None => Boot::Recheck(self.store.config().recheck_delay()),
        }
    }

    /// Second look after the boot delay. Shows the banner if there is still no
    /// valid decision. Returns whether the banner is now showing.
    pub fn recheck(&mut self) -> bool {
        if self.store.get_consent().is_some() {
            return false;
        }
        self.controller.show_banner();
        true
    }

    pub fn show_banner(&mut self) {
        self.controller.show_banner();
    }

    /// Open the preferences modal prefilled from the stored decision.
    pub fn show_modal(&mut self) {
        let prefill = self.store.get_consent().map(|r| r.choice()).unwrap_or_default();
        self.controller.show_modal(prefill);
    }

    /// Forget the stored decision and ask again.
    pub fn reset(&mut self) {
        self.store.reset();
        self.controller.restart();
    }

    /// Feed a UI event to the controller.
    pub fn dispatch(&mut self, event: UiEvent) -> Reaction {
        let stored = if matches!(event, UiEvent::ManagePreferences) {
            self.store.get_consent().map(|r| r.choice())
        } else {
            None
        };
        self.controller.handle(event, stored)
    }

    /// Apply the result of a save requested by [`Self::dispatch`].
    ///
    /// Signals fire only for the save the UI is still waiting on.
    pub fn complete_save(&mut self, outcome: SaveOutcome) {
        if !self.controller.complete_save(outcome.persisted) {
            log::debug!("consent: save finished after the consent UI moved on, not announcing");
            return;
        }
        if outcome.persisted {
            self.broadcaster.announce(&outcome.record);
        } else {
            log::warn!("consent: decision not persisted, keeping consent UI open");
        }
    }
}
