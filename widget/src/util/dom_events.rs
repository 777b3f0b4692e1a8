//! Re-dispatch consent signals as DOM `CustomEvent`s.
//!
//! Third-party snippets on the page listen with
//! `document.addEventListener("cookieConsent:analytics", ...)` and read the
//! record from `event.detail`, so they need no Rust-side hook.

#[cfg(test)]
#[path = "dom_events_test.rs"]
mod dom_events_test;

use consent::ConsentSignal;

/// JSON text used as the event `detail`.
pub fn signal_detail(signal: ConsentSignal<'_>) -> Option<String> {
    match serde_json::to_string(signal.record) {
        Ok(json) => Some(json),
        Err(e) => {
            log::warn!("consent: failed to serialize {} detail: {e}", signal.name());
            None
        }
    }
}

/// Fire `signal` on `document`. No-op outside the browser.
pub fn dispatch(signal: ConsentSignal<'_>) {
    let Some(detail) = signal_detail(signal) else {
        return;
    };
    #[cfg(feature = "csr")]
    {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let init = web_sys::CustomEventInit::new();
        if let Ok(value) = js_sys::JSON::parse(&detail) {
            init.set_detail(&value);
        }
        match web_sys::CustomEvent::new_with_event_init_dict(signal.name(), &init) {
            Ok(event) => {
                let _ = document.dispatch_event(&event);
            }
            Err(e) => log::warn!("consent: failed to create {} event: {e:?}", signal.name()),
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = detail;
    }
}
