//! Footer link that reopens the preferences modal.

use leptos::prelude::*;

use crate::state::consent::ConsentHandle;

#[component]
pub fn CookieSettingsLink() -> impl IntoView {
    let consent = expect_context::<ConsentHandle>();

    view! {
        <button type="button" class="cookie-settings-link" on:click=move |_| consent.show_modal()>
            "Cookie settings"
        </button>
    }
}
