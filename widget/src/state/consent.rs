//! Reactive handle over the page's consent service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ConsentWidget` builds one handle at startup and provides it through Leptos
//! context. Components render from [`ConsentHandle::view`] and feed clicks and
//! keys back through [`ConsentHandle::dispatch`]; page code uses the same
//! handle for `has_consent`, `is_category_allowed`, `show_modal`, and `reset`.
//!
//! DESIGN
//! ======
//! The service holds boxed listeners, so it lives in thread-local storage
//! (`StoredValue::new_local`) while the handle itself stays `Copy`. Saves,
//! reveal timers, and the boot recheck run as local tasks; outside a `csr`
//! build those tasks complete synchronously because every delay is zero.
//!
//! Listeners run while the service is borrowed. They should act on the
//! payload record and must not call back into the handle.

#[cfg(test)]
#[path = "consent_test.rs"]
mod consent_test;

use std::future::Future;

use consent::{
    Boot, Category, ConsentConfig, ConsentRecord, ConsentService, ConsentSignal, ConsentStore, ConsentView,
    Phase, Reaction, StorageTier, SubscriptionId, TwoTierStorage, UiEvent,
};
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;

use crate::storage::{CookieTier, LocalStorageTier};
use crate::util::dom_events;
use crate::util::timing::{self, BrowserClock, TimerDelay};

pub type BrowserConsentService = ConsentService<CookieTier, LocalStorageTier>;

/// `Copy` handle shared by the widget components and page code.
pub struct ConsentHandle<P = CookieTier, F = LocalStorageTier> {
    service: StoredValue<ConsentService<P, F>, LocalStorage>,
    view: RwSignal<ConsentView>,
}

impl<P, F> Clone for ConsentHandle<P, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, F> Copy for ConsentHandle<P, F> {}

impl ConsentHandle {
    /// Handle over the cookie + `localStorage` tiers, with signals mirrored
    /// to DOM events.
    pub fn browser(config: ConsentConfig) -> Self {
        let storage = TwoTierStorage::new(CookieTier, LocalStorageTier);
        let store = ConsentStore::new(storage, config).with_clock(BrowserClock);
        let mut service = ConsentService::new(store);
        service.subscribe_all(dom_events::dispatch);
        Self::new(service)
    }
}

impl<P, F> ConsentHandle<P, F>
where
    P: StorageTier + Clone + 'static,
    F: StorageTier + Clone + 'static,
{
    pub fn new(service: ConsentService<P, F>) -> Self {
        let view = RwSignal::new(service.view());
        Self { service: StoredValue::new_local(service), view }
    }

    /// Reactive render snapshot.
    pub fn view(&self) -> ReadSignal<ConsentView> {
        self.view.read_only()
    }

    pub fn has_consent(&self) -> bool {
        self.service.try_with_value(ConsentService::has_consent).unwrap_or(false)
    }

    pub fn is_category_allowed(&self, category: &str) -> bool {
        self.service
            .try_with_value(|s| s.is_category_allowed(category))
            .unwrap_or_else(|| category == Category::Necessary.as_str())
    }

    pub fn get_consent(&self) -> Option<ConsentRecord> {
        self.service.try_with_value(ConsentService::get_consent).flatten()
    }

    pub fn subscribe(&self, category: Category, listener: impl Fn(ConsentSignal<'_>) + 'static) -> Option<SubscriptionId> {
        self.service.try_update_value(|s| s.subscribe(category, listener))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.service.try_update_value(|s| s.unsubscribe(id)).unwrap_or(false)
    }

    pub fn show_banner(&self) {
        self.mutate(ConsentService::show_banner);
    }

    pub fn show_modal(&self) {
        self.mutate(ConsentService::show_modal);
    }

    pub fn reset(&self) {
        self.mutate(ConsentService::reset);
    }

    /// Page-load entry point: replay a stored decision or, after the recheck
    /// delay, show the banner.
    pub fn boot(&self) {
        let Some(Boot::Recheck(delay)) = self.service.try_update_value(ConsentService::boot) else {
            return;
        };
        let handle = *self;
        spawn(async move {
            timing::sleep(delay).await;
            handle.mutate(|s| {
                s.recheck();
            });
        });
    }

    /// Feed a UI event through the controller and run any save it requests.
    pub fn dispatch(&self, event: UiEvent) -> Reaction {
        let reaction = self.service.try_update_value(|s| s.dispatch(event)).unwrap_or_default();
        self.sync();
        if let Some(choice) = reaction.save {
            let Some(store) = self.service.try_with_value(|s| s.store().clone()) else {
                return reaction;
            };
            let handle = *self;
            spawn(async move {
                let outcome = store.save_consent(choice, &TimerDelay).await;
                handle.service.update_value(|s| s.complete_save(outcome));
                handle.sync();
            });
        }
        reaction
    }

    fn mutate(&self, f: impl FnOnce(&mut ConsentService<P, F>)) {
        self.service.update_value(f);
        self.sync();
    }

    /// Publish the latest snapshot and arm the reveal timer for a fresh show.
    fn sync(&self) {
        let Some(next) = self.service.try_with_value(ConsentService::view) else {
            return;
        };
        let previous_epoch = self.view.with_untracked(|v| v.epoch);
        let needs_reveal = next.phase != Phase::Hidden && !next.revealed && next.epoch != previous_epoch;
        let epoch = next.epoch;
        self.view.set(next);

        if needs_reveal {
            let delay = self.service.with_value(|s| s.store().config().reveal_delay());
            let handle = *self;
            spawn(async move {
                timing::sleep(delay).await;
                handle.dispatch(UiEvent::Reveal { epoch });
            });
        }
    }
}

#[cfg(feature = "csr")]
fn spawn(task: impl Future<Output = ()> + 'static) {
    leptos::task::spawn_local(task);
}

/// Outside the browser every delay is zero, so tasks finish on first poll.
#[cfg(not(feature = "csr"))]
fn spawn(task: impl Future<Output = ()> + 'static) {
    use std::pin::pin;
    use std::task::{Context, Waker};

    let mut task = pin!(task);
    let mut cx = Context::from_waker(Waker::noop());
    if task.as_mut().poll(&mut cx).is_pending() {
        log::warn!("consent: background task did not complete outside the browser");
    }
}
