use super::*;

fn key(key: Key, shift: bool) -> UiEvent {
    UiEvent::Key(KeyInput { key, shift })
}

fn banner() -> PresentationController {
    let mut c = PresentationController::new();
    c.show_banner();
    c
}

fn modal(prefill: ConsentChoice) -> PresentationController {
    let mut c = PresentationController::new();
    c.show_modal(prefill);
    let epoch = c.view().epoch;
    c.handle(UiEvent::Reveal { epoch }, None);
    c
}

// =============================================================
// Initial state and showing
// =============================================================

#[test]
fn starts_hidden() {
    let c = PresentationController::new();
    assert_eq!(c.phase(), Phase::Hidden);
    assert_eq!(*c.view(), ConsentView::default());
}

#[test]
fn show_banner_enters_banner_unrevealed() {
    let c = banner();
    assert_eq!(c.phase(), Phase::BannerShown);
    assert!(!c.view().revealed);
    assert_eq!(c.view().epoch, 1);
}

#[test]
fn show_banner_twice_is_noop() {
    let mut c = banner();
    c.handle(UiEvent::Reveal { epoch: 1 }, None);
    c.show_banner();
    assert_eq!(c.view().epoch, 1);
    assert!(c.view().revealed);
}

#[test]
fn show_banner_replaces_open_modal() {
    let mut c = modal(ConsentChoice::accept_all());
    c.show_banner();
    assert_eq!(c.phase(), Phase::BannerShown);
    assert!(c.view().modal_aria_hidden());
}

#[test]
fn hidden_ignores_decisions() {
    let mut c = PresentationController::new();
    assert_eq!(c.handle(UiEvent::AcceptAll, None), Reaction::default());
    assert_eq!(c.phase(), Phase::Hidden);
}

// =============================================================
// Reveal
// =============================================================

#[test]
fn reveal_with_current_epoch_marks_visible() {
    let mut c = banner();
    let epoch = c.view().epoch;
    c.handle(UiEvent::Reveal { epoch }, None);
    assert!(c.view().revealed);
    assert_eq!(c.view().focus, None);
}

#[test]
fn stale_reveal_is_ignored() {
    let mut c = banner();
    let stale = c.view().epoch;
    c.handle(UiEvent::ManagePreferences, None);
    c.handle(UiEvent::Reveal { epoch: stale }, None);
    assert_eq!(c.phase(), Phase::ModalShown);
    assert!(!c.view().revealed);
    assert!(c.view().modal_aria_hidden());
}

#[test]
fn reveal_after_hide_does_nothing() {
    let mut c = banner();
    let epoch = c.view().epoch;
    c.hide();
    c.handle(UiEvent::Reveal { epoch }, None);
    assert_eq!(c.phase(), Phase::Hidden);
    assert!(!c.view().revealed);
}

#[test]
fn modal_is_aria_hidden_until_revealed_then_focuses_first_control() {
    let mut c = PresentationController::new();
    c.show_modal(ConsentChoice::default());
    assert!(c.view().modal_aria_hidden());
    let epoch = c.view().epoch;
    c.handle(UiEvent::Reveal { epoch }, None);
    assert!(!c.view().modal_aria_hidden());
    assert_eq!(c.view().focus, Some(FocusTarget::Close));
}

// =============================================================
// Banner decisions
// =============================================================

#[test]
fn banner_accept_all_requests_full_save() {
    let mut c = banner();
    let reaction = c.handle(UiEvent::AcceptAll, None);
    assert_eq!(reaction.save, Some(ConsentChoice::accept_all()));
    assert!(c.view().saving);
    assert!(c.complete_save(true));
    assert_eq!(c.phase(), Phase::Hidden);
}

#[test]
fn banner_reject_requests_empty_save() {
    let mut c = banner();
    let reaction = c.handle(UiEvent::RejectAll, None);
    assert_eq!(reaction.save, Some(ConsentChoice::reject_all()));
}

#[test]
fn banner_ignores_second_decision_while_saving() {
    let mut c = banner();
    c.handle(UiEvent::AcceptAll, None);
    assert_eq!(c.handle(UiEvent::RejectAll, None).save, None);
}

#[test]
fn failed_save_keeps_banner_open() {
    let mut c = banner();
    c.handle(UiEvent::AcceptAll, None);
    c.complete_save(false);
    assert_eq!(c.phase(), Phase::BannerShown);
    assert!(!c.view().saving);
    assert!(c.handle(UiEvent::AcceptAll, None).save.is_some());
}

#[test]
fn complete_save_without_pending_save_is_ignored() {
    let mut c = banner();
    assert!(!c.complete_save(true));
    assert_eq!(c.phase(), Phase::BannerShown);
}

#[test]
fn restart_abandons_pending_save() {
    let mut c = banner();
    c.handle(UiEvent::AcceptAll, None);
    c.restart();
    assert_eq!(c.phase(), Phase::BannerShown);
    assert!(!c.view().saving);
    assert_eq!(c.view().epoch, 2);
    assert!(!c.complete_save(true));
    assert_eq!(c.phase(), Phase::BannerShown);
}

#[test]
fn manage_preferences_opens_prefilled_modal() {
    let mut c = banner();
    let stored = ConsentChoice { analytics: true, marketing: false };
    c.handle(UiEvent::ManagePreferences, Some(stored));
    assert_eq!(c.phase(), Phase::ModalShown);
    assert_eq!(c.view().draft, stored);
    assert_eq!(c.view().epoch, 2);
}

#[test]
fn manage_preferences_defaults_to_all_off() {
    let mut c = banner();
    c.handle(UiEvent::ManagePreferences, None);
    assert_eq!(c.view().draft, ConsentChoice::default());
}

// =============================================================
// Modal decisions
// =============================================================

#[test]
fn modal_toggle_then_save_persists_draft() {
    let mut c = modal(ConsentChoice::accept_all());
    c.handle(UiEvent::Toggle(Category::Analytics), None);
    let reaction = c.handle(UiEvent::SavePreferences, None);
    assert_eq!(reaction.save, Some(ConsentChoice { analytics: false, marketing: true }));
}

#[test]
fn modal_toggle_necessary_has_no_effect() {
    let mut c = modal(ConsentChoice::default());
    c.handle(UiEvent::Toggle(Category::Necessary), None);
    assert_eq!(c.view().draft, ConsentChoice::default());
}

#[test]
fn modal_accept_and_reject_override_draft() {
    let mut c = modal(ConsentChoice { analytics: true, marketing: false });
    assert_eq!(c.handle(UiEvent::AcceptAll, None).save, Some(ConsentChoice::accept_all()));

    let mut c = modal(ConsentChoice::accept_all());
    assert_eq!(c.handle(UiEvent::RejectAll, None).save, Some(ConsentChoice::reject_all()));
}

#[test]
fn modal_dismissals_discard_without_saving() {
    for event in [UiEvent::Close, UiEvent::OverlayClick, key(Key::Escape, false)] {
        let mut c = modal(ConsentChoice::default());
        c.handle(UiEvent::Toggle(Category::Marketing), None);
        let reaction = c.handle(event, None);
        assert_eq!(reaction.save, None);
        assert!(reaction.consumed);
        assert_eq!(c.phase(), Phase::Hidden);
    }
}

#[test]
fn failed_save_keeps_modal_open_with_draft() {
    let mut c = modal(ConsentChoice::default());
    c.handle(UiEvent::Toggle(Category::Analytics), None);
    c.handle(UiEvent::SavePreferences, None);
    c.complete_save(false);
    assert_eq!(c.phase(), Phase::ModalShown);
    assert!(c.view().draft.analytics);
}

#[test]
fn modal_ignores_escape_while_saving() {
    let mut c = modal(ConsentChoice::default());
    c.handle(UiEvent::SavePreferences, None);
    c.handle(key(Key::Escape, false), None);
    assert_eq!(c.phase(), Phase::ModalShown);
}

// =============================================================
// Focus trap
// =============================================================

#[test]
fn tab_cycles_forward_and_wraps() {
    let mut c = modal(ConsentChoice::default());
    let mut seen = Vec::new();
    for _ in 0..FocusTarget::ORDER.len() {
        let reaction = c.handle(key(Key::Tab, false), None);
        assert!(reaction.consumed);
        seen.push(c.view().focus.expect("focus"));
    }
    assert_eq!(
        seen,
        vec![
            FocusTarget::Analytics,
            FocusTarget::Marketing,
            FocusTarget::Reject,
            FocusTarget::AcceptAll,
            FocusTarget::Save,
            FocusTarget::Close,
        ]
    );
}

#[test]
fn shift_tab_from_first_wraps_to_last() {
    let mut c = modal(ConsentChoice::default());
    c.handle(key(Key::Tab, true), None);
    assert_eq!(c.view().focus, Some(FocusTarget::Save));
}

#[test]
fn pointer_focus_moves_trap_position() {
    let mut c = modal(ConsentChoice::default());
    c.handle(UiEvent::Focused(FocusTarget::Reject), None);
    c.handle(key(Key::Tab, false), None);
    assert_eq!(c.view().focus, Some(FocusTarget::AcceptAll));
}

#[test]
fn optional_categories_have_checkbox_targets() {
    let targets: Vec<_> = Category::ALL
        .into_iter()
        .filter(|c| c.is_optional())
        .map(FocusTarget::for_category)
        .collect();
    assert_eq!(targets, vec![Some(FocusTarget::Analytics), Some(FocusTarget::Marketing)]);
    assert_eq!(FocusTarget::for_category(Category::Necessary), None);
}

#[test]
fn cycle_from_nothing_starts_at_ends() {
    assert_eq!(FocusTarget::cycle(None, false), FocusTarget::Close);
    assert_eq!(FocusTarget::cycle(None, true), FocusTarget::Save);
}

#[test]
fn tab_is_not_trapped_outside_modal() {
    let mut c = banner();
    let reaction = c.handle(key(Key::Tab, false), None);
    assert!(!reaction.consumed);
    assert_eq!(c.view().focus, None);
}

#[test]
fn other_keys_are_ignored() {
    let mut c = modal(ConsentChoice::default());
    let reaction = c.handle(key(Key::Other, false), None);
    assert_eq!(reaction, Reaction::default());
    assert_eq!(c.phase(), Phase::ModalShown);
}

#[test]
fn key_names_map_from_browser_values() {
    assert_eq!(Key::from_name("Tab"), Key::Tab);
    assert_eq!(Key::from_name("Escape"), Key::Escape);
    assert_eq!(Key::from_name("Esc"), Key::Escape);
    assert_eq!(Key::from_name("Enter"), Key::Other);
}
