//! Category-scoped notification of consent decisions.
//!
//! Signals are synchronous and fire-and-forget. Listeners registered after a
//! signal fired never see it; late code should ask
//! [`crate::store::ConsentStore::is_allowed`] instead.

#[cfg(test)]
#[path = "broadcast_test.rs"]
mod broadcast_test;

use crate::record::{Category, ConsentRecord};

/// One delivered notification.
#[derive(Clone, Copy, Debug)]
pub struct ConsentSignal<'a> {
    pub category: Category,
    pub record: &'a ConsentRecord,
}

impl ConsentSignal<'_> {
    /// Signal name, e.g. `cookieConsent:marketing`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.category.signal_name()
    }
}

/// Handle returned by [`Broadcaster::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(ConsentSignal<'_>)>;

struct Subscription {
    id: SubscriptionId,
    /// `None` listens to every category.
    category: Option<Category>,
    listener: Listener,
}

#[derive(Default)]
pub struct Broadcaster {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl std::fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broadcaster")
            .field("listeners", &self.subscriptions.len())
            .finish()
    }
}

impl Broadcaster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for signals of one category.
    pub fn subscribe(&mut self, category: Category, listener: impl Fn(ConsentSignal<'_>) + 'static) -> SubscriptionId {
        self.insert(Some(category), Box::new(listener))
    }

    /// Register `listener` for signals of every category.
    pub fn subscribe_all(&mut self, listener: impl Fn(ConsentSignal<'_>) + 'static) -> SubscriptionId {
        self.insert(None, Box::new(listener))
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|sub| sub.id != id);
        self.subscriptions.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Fire `necessary`, then every granted optional category, each carrying
    /// the full record. Returns the categories that were signalled.
    pub fn announce(&self, record: &ConsentRecord) -> Vec<Category> {
        let fired: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|category| record.allows(*category))
            .collect();

        for category in &fired {
            let signal = ConsentSignal { category: *category, record };
            log::debug!("consent: signal {}", signal.name());
            for sub in &self.subscriptions {
                if sub.category.map_or(true, |c| c == *category) {
                    (sub.listener)(signal);
                }
            }
        }
        fired
    }

    fn insert(&mut self, category: Option<Category>, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, category, listener });
        id
    }
}
