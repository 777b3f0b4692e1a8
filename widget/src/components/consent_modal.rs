//! Cookie preferences modal.
//!
//! Keyboard focus is trapped inside the dialog: Tab and Shift+Tab are handed
//! to the controller, which picks the next [`FocusTarget`], and an effect moves
//! DOM focus to match. The dialog stays `aria-hidden` until its entry
//! transition has run.

use consent::{Category, ConsentView, FocusTarget, Key, KeyInput, UiEvent};
use leptos::prelude::*;

use crate::state::consent::ConsentHandle;

/// Preferences dialog with one toggle per optional category.
#[component]
pub fn ConsentModal() -> impl IntoView {
    let consent = expect_context::<ConsentHandle>();
    let snapshot = consent.view();

    let close_ref = NodeRef::<leptos::html::Button>::new();
    let analytics_ref = NodeRef::<leptos::html::Input>::new();
    let marketing_ref = NodeRef::<leptos::html::Input>::new();
    let reject_ref = NodeRef::<leptos::html::Button>::new();
    let accept_ref = NodeRef::<leptos::html::Button>::new();
    let save_ref = NodeRef::<leptos::html::Button>::new();

    Effect::new(move || {
        let focus = snapshot.with(|v| v.focus);
        #[cfg(feature = "csr")]
        {
            let _ = match focus {
                Some(FocusTarget::Close) => close_ref.get().map(|el| el.focus()),
                Some(FocusTarget::Analytics) => analytics_ref.get().map(|el| el.focus()),
                Some(FocusTarget::Marketing) => marketing_ref.get().map(|el| el.focus()),
                Some(FocusTarget::Reject) => reject_ref.get().map(|el| el.focus()),
                Some(FocusTarget::AcceptAll) => accept_ref.get().map(|el| el.focus()),
                Some(FocusTarget::Save) => save_ref.get().map(|el| el.focus()),
                None => None,
            };
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = focus;
        }
    });

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        let input = KeyInput { key: Key::from_name(&ev.key()), shift: ev.shift_key() };
        if consent.dispatch(UiEvent::Key(input)).consumed {
            ev.prevent_default();
        }
    };
    let on_focus = move |target: FocusTarget| {
        consent.dispatch(UiEvent::Focused(target));
    };

    let visible = move || snapshot.with(|v| v.modal_open() && v.revealed);
    let aria_hidden = move || if snapshot.with(ConsentView::modal_aria_hidden) { "true" } else { "false" };
    let saving = move || snapshot.with(|v| v.saving);

    let optional_rows = Category::ALL
        .into_iter()
        .filter_map(|category| FocusTarget::for_category(category).map(|target| (category, target)))
        .map(|(category, target)| {
            let input_ref = if target == FocusTarget::Analytics { analytics_ref } else { marketing_ref };
            let checked = move || snapshot.with(|v| v.draft.allows(category));
            view! {
                <label class="cookie-modal__category">
                    <input
                        type="checkbox"
                        node_ref=input_ref
                        prop:checked=checked
                        on:focus=move |_| on_focus(target)
                        on:change=move |_| {
                            consent.dispatch(UiEvent::Toggle(category));
                        }
                    />
                    <span class="cookie-modal__category-name">{category_label(category)}</span>
                    <span class="cookie-modal__category-desc">{category_description(category)}</span>
                </label>
            }
        })
        .collect_view();

    view! {
        <div
            class="cookie-modal__backdrop"
            class:cookie-modal__backdrop--visible=visible
            on:click=move |_| {
                consent.dispatch(UiEvent::OverlayClick);
            }
        >
            <div
                class="cookie-modal"
                role="dialog"
                aria-modal="true"
                aria-labelledby="cookie-modal-title"
                aria-hidden=aria_hidden
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
            >
                <div class="cookie-modal__header">
                    <h2 id="cookie-modal-title">"Cookie preferences"</h2>
                    <button
                        type="button"
                        class="cookie-modal__close"
                        title="Close"
                        aria-label="Close cookie preferences"
                        node_ref=close_ref
                        on:focus=move |_| on_focus(FocusTarget::Close)
                        on:click=move |_| {
                            consent.dispatch(UiEvent::Close);
                        }
                    >
                        "✕"
                    </button>
                </div>

                <div class="cookie-modal__body">
                    <label class="cookie-modal__category">
                        <input type="checkbox" prop:checked=true disabled=true/>
                        <span class="cookie-modal__category-name">{category_label(Category::Necessary)}</span>
                        <span class="cookie-modal__category-desc">
                            {category_description(Category::Necessary)}
                        </span>
                    </label>
                    {optional_rows}
                </div>

                <div class="cookie-modal__actions">
                    <button
                        type="button"
                        class="cookie-modal__btn cookie-modal__btn--secondary"
                        node_ref=reject_ref
                        disabled=saving
                        on:focus=move |_| on_focus(FocusTarget::Reject)
                        on:click=move |_| {
                            consent.dispatch(UiEvent::RejectAll);
                        }
                    >
                        "Reject"
                    </button>
                    <button
                        type="button"
                        class="cookie-modal__btn cookie-modal__btn--secondary"
                        node_ref=accept_ref
                        disabled=saving
                        on:focus=move |_| on_focus(FocusTarget::AcceptAll)
                        on:click=move |_| {
                            consent.dispatch(UiEvent::AcceptAll);
                        }
                    >
                        "Accept all"
                    </button>
                    <button
                        type="button"
                        class="cookie-modal__btn cookie-modal__btn--primary"
                        node_ref=save_ref
                        disabled=saving
                        on:focus=move |_| on_focus(FocusTarget::Save)
                        on:click=move |_| {
                            consent.dispatch(UiEvent::SavePreferences);
                        }
                    >
                        "Save preferences"
                    </button>
                </div>
            </div>
        </div>
    }
}

fn category_label(category: Category) -> &'static str {
    match category {
        Category::Necessary => "Necessary",
        Category::Analytics => "Analytics",
        Category::Marketing => "Marketing",
    }
}

fn category_description(category: Category) -> &'static str {
    match category {
        Category::Necessary => "Required for the site to function. Always on.",
        Category::Analytics => "Helps us understand how visitors use the site.",
        Category::Marketing => "Lets advertising partners measure and personalise campaigns.",
    }
}
