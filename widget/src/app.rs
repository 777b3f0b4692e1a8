//! Root components mounted into the marketing site.

use consent::{ConsentConfig, ConsentView};
use leptos::prelude::*;

use crate::components::{
    consent_banner::ConsentBanner, consent_modal::ConsentModal, cookie_settings_link::CookieSettingsLink,
    theme_toggle::ThemeToggle,
};
use crate::state::consent::ConsentHandle;
use crate::util::{page_config, sections};

/// Consent banner and modal.
///
/// Creates the page's [`ConsentHandle`], provides it as context for
/// descendants, and boots it. `config` overrides the page-embedded config.
#[component]
pub fn ConsentWidget(#[prop(optional)] config: Option<ConsentConfig>) -> impl IntoView {
    let consent = ConsentHandle::browser(config.unwrap_or_else(page_config::load));
    provide_context(consent);
    consent.boot();

    let snapshot = consent.view();

    view! {
        <Show when=move || snapshot.with(ConsentView::banner_open)>
            <ConsentBanner/>
        </Show>
        <Show when=move || snapshot.with(ConsentView::modal_open)>
            <ConsentModal/>
        </Show>
    }
}

/// Everything the site mounts: page chrome plus the consent widget.
#[component]
pub fn App() -> impl IntoView {
    sections::activate_current();
    let _ = window_event_listener(leptos::ev::hashchange, move |_| sections::activate_current());

    view! {
        <ConsentWidget/>
        <div class="site-tools">
            <ThemeToggle/>
            <CookieSettingsLink/>
        </div>
    }
}
