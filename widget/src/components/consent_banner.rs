//! Bottom-of-page consent banner.

use consent::UiEvent;
use leptos::prelude::*;

use crate::state::consent::ConsentHandle;

/// Banner with accept, reject, and manage-preferences actions.
#[component]
pub fn ConsentBanner() -> impl IntoView {
    let consent = expect_context::<ConsentHandle>();
    let snapshot = consent.view();

    let visible = move || snapshot.with(|v| v.banner_open() && v.revealed);
    let saving = move || snapshot.with(|v| v.saving);

    view! {
        <div
            class="cookie-banner"
            class:cookie-banner--visible=visible
            role="region"
            aria-label="Cookie consent"
        >
            <div class="cookie-banner__content">
                <p class="cookie-banner__text">
                    "We use cookies to keep this site working and, with your permission, to measure traffic and personalise marketing."
                </p>
                <div class="cookie-banner__actions">
                    <button
                        type="button"
                        class="cookie-banner__btn cookie-banner__btn--link"
                        on:click=move |_| {
                            consent.dispatch(UiEvent::ManagePreferences);
                        }
                    >
                        "Manage preferences"
                    </button>
                    <button
                        type="button"
                        class="cookie-banner__btn cookie-banner__btn--secondary"
                        disabled=saving
                        on:click=move |_| {
                            consent.dispatch(UiEvent::RejectAll);
                        }
                    >
                        "Reject"
                    </button>
                    <button
                        type="button"
                        class="cookie-banner__btn cookie-banner__btn--primary"
                        disabled=saving
                        on:click=move |_| {
                            consent.dispatch(UiEvent::AcceptAll);
                        }
                    >
                        "Accept all"
                    </button>
                </div>
            </div>
        </div>
    }
}
