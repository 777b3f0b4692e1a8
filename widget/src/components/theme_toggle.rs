//! Light/dark theme switch.

use leptos::prelude::*;

use crate::util::dark_mode;

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let dark = RwSignal::new(dark_mode::read_preference());
    dark_mode::apply(dark.get_untracked());

    let label = move || if dark.get() { "Switch to light mode" } else { "Switch to dark mode" };

    view! {
        <button
            type="button"
            class="theme-toggle"
            aria-label=label
            title=label
            on:click=move |_| dark.update(|d| *d = dark_mode::toggle(*d))
        >
            {move || if dark.get() { "☀" } else { "☾" }}
        </button>
    }
}
