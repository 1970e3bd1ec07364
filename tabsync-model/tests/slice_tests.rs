use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tabsync_model::features::{
    FooterColumn, FooterPayload, ThemeBuilder, ThemeBuilderMode, ThemePayload, Footer,
};
use tabsync_model::{Action, Feature, Slice};
use tabsync_types::{ManualClock, ScopeMode, UpdatedAt};

fn theme_slice(start: u64) -> (Slice<ThemeBuilder>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start));
    (Slice::new(clock.clone()), clock)
}

fn tokens(pairs: &[(&str, &str)]) -> ThemePayload {
    ThemePayload {
        tokens: pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        font_family: None,
    }
}

// ── Defaults ─────────────────────────────────────────────────────

#[test]
fn starts_from_default_state() {
    let (slice, _) = theme_slice(1_000);
    assert_eq!(slice.state(), &ThemeBuilder::default_state());
    assert!(!slice.state().enabled);
    assert_eq!(slice.state().mode, ThemeBuilderMode::Default);
    assert_eq!(slice.state().scope_mode, ScopeMode::Allowlist);
    assert!(slice.state().scope_paths.is_empty());
    assert_eq!(slice.state().updated_at, UpdatedAt::ZERO);
    assert_eq!(slice.revision(), 0);
}

// ── Clock ────────────────────────────────────────────────────────

#[test]
fn dispatch_sets_clock_to_now() {
    let (mut slice, _) = theme_slice(1_000);
    assert!(slice.dispatch(Action::SetEnabled(true)));
    assert_eq!(slice.state().updated_at, UpdatedAt::from_millis(1_000));
}

#[test]
fn dispatch_is_strictly_monotonic_on_frozen_clock() {
    let (mut slice, _) = theme_slice(1_000);
    slice.dispatch(Action::SetEnabled(true));
    slice.dispatch(Action::SetMode(ThemeBuilderMode::Preview));
    slice.dispatch(Action::SetMode(ThemeBuilderMode::Published));
    assert_eq!(slice.state().updated_at, UpdatedAt::from_millis(1_002));
}

#[test]
fn dispatch_never_goes_backwards() {
    let (mut slice, clock) = theme_slice(5_000);
    slice.dispatch(Action::SetEnabled(true));
    clock.set(10);
    slice.dispatch(Action::SetEnabled(false));
    assert_eq!(slice.state().updated_at, UpdatedAt::from_millis(5_001));
}

#[test]
fn no_op_does_not_tick_or_count() {
    let (mut slice, _) = theme_slice(1_000);
    assert!(!slice.dispatch(Action::SetEnabled(false)));
    assert!(!slice.dispatch(Action::MarkSaved));
    assert!(!slice.dispatch(Action::Undo));
    assert!(!slice.dispatch(Action::Redo));
    assert!(!slice.dispatch(Action::Reset));
    assert_eq!(slice.state().updated_at, UpdatedAt::ZERO);
    assert_eq!(slice.revision(), 0);
}

// ── Scope actions ────────────────────────────────────────────────

#[test]
fn set_scope_normalizes_paths() {
    let (mut slice, _) = theme_slice(1);
    slice.dispatch(Action::SetScope {
        mode: ScopeMode::Denylist,
        paths: vec![" /admin ".into(), "".into(), "/admin".into(), "/checkout".into()],
    });
    assert_eq!(slice.state().scope_mode, ScopeMode::Denylist);
    assert_eq!(slice.state().scope_paths, vec!["/admin", "/checkout"]);
}

#[test]
fn add_and_remove_scope_paths() {
    let (mut slice, _) = theme_slice(1);
    assert!(slice.dispatch(Action::AddScopePath("/shop".into())));
    assert!(!slice.dispatch(Action::AddScopePath(" /shop".into())));
    assert!(!slice.dispatch(Action::AddScopePath("  ".into())));
    assert!(slice.dispatch(Action::AddScopePath("/sale".into())));
    assert_eq!(slice.state().scope_paths, vec!["/shop", "/sale"]);

    assert!(slice.dispatch(Action::RemoveScopePath("/shop".into())));
    assert!(!slice.dispatch(Action::RemoveScopePath("/missing".into())));
    assert_eq!(slice.state().scope_paths, vec!["/sale"]);
}

// ── Commit / undo / redo ─────────────────────────────────────────

#[test]
fn commit_pushes_history_and_marks_dirty() {
    let (mut slice, _) = theme_slice(1);
    slice.dispatch(Action::Commit(tokens(&[("color.primary", "#111")])));
    slice.dispatch(Action::Commit(tokens(&[("color.primary", "#222")])));

    let state = slice.state();
    assert!(state.dirty);
    assert_eq!(state.payload, tokens(&[("color.primary", "#222")]));
    assert_eq!(
        state.history,
        vec![ThemePayload::default(), tokens(&[("color.primary", "#111")])]
    );
    assert!(state.future.is_empty());
}

#[test]
fn committing_identical_payload_is_a_no_op() {
    let (mut slice, _) = theme_slice(1);
    assert!(!slice.dispatch(Action::Commit(ThemePayload::default())));
    assert!(slice.state().history.is_empty());
}

#[test]
fn undo_then_redo_restores_payload() {
    let (mut slice, _) = theme_slice(1);
    let first = tokens(&[("radius", "4px")]);
    let second = tokens(&[("radius", "8px")]);
    slice.dispatch(Action::Commit(first.clone()));
    slice.dispatch(Action::Commit(second.clone()));

    assert!(slice.dispatch(Action::Undo));
    assert_eq!(slice.state().payload, first);
    assert_eq!(slice.state().future, vec![second.clone()]);

    assert!(slice.dispatch(Action::Redo));
    assert_eq!(slice.state().payload, second);
    assert!(slice.state().future.is_empty());
    assert!(!slice.state().can_redo());
}

#[test]
fn commit_after_undo_clears_future() {
    let (mut slice, _) = theme_slice(1);
    slice.dispatch(Action::Commit(tokens(&[("a", "1")])));
    slice.dispatch(Action::Commit(tokens(&[("a", "2")])));
    slice.dispatch(Action::Undo);
    assert!(slice.state().can_redo());

    slice.dispatch(Action::Commit(tokens(&[("a", "3")])));
    assert!(!slice.state().can_redo());
}

#[test]
fn history_is_capped() {
    let clock = Arc::new(ManualClock::new(1));
    let mut slice: Slice<ThemeBuilder> = Slice::new(clock).with_max_history(2);
    for i in 0..5 {
        slice.dispatch(Action::Commit(tokens(&[("step", i.to_string().as_str())])));
    }
    assert_eq!(
        slice.state().history,
        vec![tokens(&[("step", "2")]), tokens(&[("step", "3")])]
    );
}

#[test]
fn zero_history_disables_undo() {
    let clock = Arc::new(ManualClock::new(1));
    let mut slice: Slice<Footer> = Slice::new(clock).with_max_history(0);
    slice.dispatch(Action::Commit(FooterPayload {
        columns: vec![FooterColumn::default()],
        ..FooterPayload::default()
    }));
    assert!(!slice.state().can_undo());
    assert!(!slice.dispatch(Action::Undo));
}

// ── Editor bookkeeping ───────────────────────────────────────────

#[test]
fn mark_saved_clears_dirty() {
    let (mut slice, _) = theme_slice(1);
    slice.dispatch(Action::Commit(tokens(&[("a", "1")])));
    assert!(slice.dispatch(Action::MarkSaved));
    assert!(!slice.state().dirty);
}

#[test]
fn set_active_tracks_selection() {
    let (mut slice, _) = theme_slice(1);
    assert!(slice.dispatch(Action::SetActive(Some("hero".into()))));
    assert!(!slice.dispatch(Action::SetActive(Some("hero".into()))));
    assert_eq!(slice.state().active_id.as_deref(), Some("hero"));
}

#[test]
fn reset_returns_to_defaults_with_newer_clock() {
    let (mut slice, _) = theme_slice(100);
    slice.dispatch(Action::SetEnabled(true));
    slice.dispatch(Action::Commit(tokens(&[("a", "1")])));
    let before = slice.state().updated_at;

    assert!(slice.dispatch(Action::Reset));
    let state = slice.state();
    assert!(state.updated_at > before);
    assert!(!state.enabled);
    assert!(state.history.is_empty());
    assert_eq!(state.payload, ThemePayload::default());
}

// ── Hydration ────────────────────────────────────────────────────

#[test]
fn hydrate_replaces_without_ticking() {
    let (mut slice, _) = theme_slice(1_000);
    let mut next = ThemeBuilder::default_state();
    next.enabled = true;
    next.updated_at = UpdatedAt::from_millis(42);

    assert!(slice.hydrate(next.clone()));
    assert_eq!(slice.state(), &next);
    assert_eq!(slice.revision(), 1);
    assert!(!slice.hydrate(next));
    assert_eq!(slice.revision(), 1);
}

// ── Listeners ────────────────────────────────────────────────────

#[test]
fn listeners_see_every_change() {
    let (mut slice, _) = theme_slice(1);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let id = slice.subscribe(move |state| sink.borrow_mut().push(state.mode));

    slice.dispatch(Action::SetMode(ThemeBuilderMode::Preview));
    slice.dispatch(Action::SetMode(ThemeBuilderMode::Preview));
    slice.dispatch(Action::SetMode(ThemeBuilderMode::Published));
    assert_eq!(
        *seen.borrow(),
        vec![ThemeBuilderMode::Preview, ThemeBuilderMode::Published]
    );

    assert!(slice.unsubscribe(id));
    assert!(!slice.unsubscribe(id));
    slice.dispatch(Action::SetMode(ThemeBuilderMode::Default));
    assert_eq!(seen.borrow().len(), 2);
    assert_eq!(slice.listener_count(), 0);
}
