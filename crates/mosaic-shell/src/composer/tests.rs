use std::time::Duration;

use mosaic_common::{Action, ClickPoint, PageId, Rect, SurfaceId, WindowId};
use mosaic_config::state::load_snapshot;
use mosaic_config::MosaicConfig;
use mosaic_platform::KeyCombo;
use serde_json::{json, Value};

use super::{IpcSource, Shell};
use crate::backend::{Backend, ChromeTarget, OverlayKind, SurfaceEvent};
use crate::messages::ChromeMessage;
use crate::testing::FakeBackend;

const W: WindowId = WindowId(1);
const HEADER: SurfaceId = SurfaceId(1);

fn shell() -> Shell<FakeBackend> {
    let mut shell = Shell::new(FakeBackend::new(), MosaicConfig::default(), None);
    shell.start(None).unwrap();
    shell
}

fn slots(shell: &Shell<FakeBackend>, window: WindowId, page: PageId) -> Vec<SurfaceId> {
    shell
        .window(window)
        .unwrap()
        .pool(page)
        .unwrap()
        .slots()
        .to_vec()
}

fn url(shell: &Shell<FakeBackend>, surface: SurfaceId) -> Option<String> {
    shell.backend().current_url(surface)
}

fn last_popup(shell: &Shell<FakeBackend>) -> Option<ChromeMessage> {
    shell
        .backend()
        .posted(W, ChromeTarget::Overlay(OverlayKind::Popup))
        .last()
        .map(|m| (*m).clone())
}

// =========================================================================
// Startup and layout
// =========================================================================

#[test]
fn starts_with_one_window_and_four_tabs() {
    let shell = shell();
    let state = shell.window(W).unwrap();
    assert_eq!(state.header, HEADER);
    assert_eq!(state.tab_count(PageId(1)), 4);
    assert_eq!(shell.pages().len(), 1);

    let s = slots(&shell, W, PageId(1));
    assert_eq!(s.len(), 12);
    let start = "mosaic://localhost/start.html";
    for surface in &s[..4] {
        assert_eq!(url(&shell, *surface).as_deref(), Some(start));
    }
    assert_eq!(url(&shell, s[4]), None);

    let fake = shell.backend().surface(s[0]);
    assert_eq!(fake.spec.partition.as_deref(), Some("persist:page_1"));
    assert!(fake.spec.init_script.as_ref().unwrap().contains("tabIndex = 0"));
    assert_eq!(
        shell.backend().surface(HEADER).url(),
        Some("mosaic://localhost/header.html")
    );
}

#[test]
fn initial_layout_tiles_below_header() {
    let shell = shell();
    let s = slots(&shell, W, PageId(1));
    let b = shell.backend();
    assert_eq!(b.surface(HEADER).bounds, Rect::new(0.0, 0.0, 1200.0, 80.0));
    assert_eq!(b.surface(s[0]).bounds, Rect::new(0.0, 80.0, 600.0, 410.0));
    assert_eq!(b.surface(s[3]).bounds, Rect::new(600.0, 490.0, 600.0, 410.0));
    for surface in &s[4..] {
        assert_eq!(b.surface(*surface).bounds, Rect::ZERO);
    }
    assert_eq!(b.window(W).stack.last(), Some(&HEADER));
}

#[test]
fn overlays_track_content_area() {
    let shell = shell();
    let expected = Rect::new(100.0, 50.0, 1200.0, 900.0);
    for kind in OverlayKind::ALL {
        assert_eq!(shell.backend().overlay(W, kind).bounds, expected);
    }
}

#[test]
fn resize_is_debounced() {
    let mut shell = shell();
    let s = slots(&shell, W, PageId(1));
    shell.backend_mut().windows.get_mut(&W).unwrap().size = (1000.0, 700.0);
    shell.on_resized(W);
    shell.tick();
    assert_eq!(
        shell.backend().surface(s[0]).bounds,
        Rect::new(0.0, 80.0, 600.0, 410.0)
    );

    shell.backend_mut().advance(Duration::from_millis(16));
    shell.tick();
    assert_eq!(
        shell.backend().surface(s[0]).bounds,
        Rect::new(0.0, 80.0, 500.0, 310.0)
    );
}

#[test]
fn maximize_waits_for_settle() {
    let mut shell = shell();
    shell.dispatch(W, Action::ToggleMaximize);
    assert!(shell.backend().window(W).maximized);
    assert_eq!(
        shell.backend().posted(W, ChromeTarget::Header).last(),
        Some(&&ChromeMessage::UpdateMaximize(true))
    );
    // A second report of the same state changes nothing.
    shell.backend_mut().clear_posts();
    shell.on_maximize_changed(W, true);
    assert!(shell.backend().posts.is_empty());
}

#[test]
fn fullscreen_parks_header_and_reclaims_height() {
    let mut shell = shell();
    let s = slots(&shell, W, PageId(1));
    shell.dispatch(W, Action::ToggleFullscreen);

    let b = shell.backend();
    assert!(b.window(W).fullscreen);
    assert_eq!(b.surface(HEADER).bounds, Rect::new(0.0, -80.0, 1200.0, 80.0));
    assert_eq!(b.surface(s[0]).bounds, Rect::new(0.0, 0.0, 600.0, 450.0));
    assert!(b
        .posted(W, ChromeTarget::Header)
        .contains(&&ChromeMessage::ToggleHeader(false)));

    shell.dispatch(W, Action::ToggleFullscreen);
    assert_eq!(
        shell.backend().surface(HEADER).bounds,
        Rect::new(0.0, 0.0, 1200.0, 80.0)
    );
}

// =========================================================================
// Pages
// =========================================================================

#[test]
fn freed_page_ids_are_reused_in_order() {
    let mut shell = shell();
    let added: Vec<_> = (0..3).map(|_| shell.add_page()).collect();
    assert_eq!(added, vec![PageId(2), PageId(3), PageId(4)]);

    shell.delete_page(PageId(2)).unwrap();
    shell.delete_page(PageId(3)).unwrap();
    assert_eq!(shell.add_page(), PageId(2));
    assert_eq!(shell.add_page(), PageId(3));
}

#[test]
fn new_page_gets_surfaces_in_every_window() {
    let mut shell = shell();
    shell.dispatch(W, Action::NewWindow);
    let page = shell.add_page();

    for window in [W, WindowId(2)] {
        let state = shell.window(window).unwrap();
        assert_eq!(state.tab_count(page), 4);
        assert_eq!(state.current_page, PageId(1));
        let s = slots(&shell, window, page);
        assert_eq!(
            shell.backend().surface(s[0]).spec.partition.as_deref(),
            Some("persist:page_2")
        );
        assert!(url(&shell, s[3]).is_some());
        assert!(url(&shell, s[4]).is_none());
    }
}

#[test]
fn switch_page_attaches_only_that_page() {
    let mut shell = shell();
    let page = shell.add_page();
    let old = slots(&shell, W, PageId(1));
    let new = slots(&shell, W, page);

    shell.dispatch(W, Action::SwitchPage(page));

    let stack = &shell.backend().window(W).stack;
    assert_eq!(stack.len(), 13);
    assert_eq!(stack.last(), Some(&HEADER));
    assert!(new.iter().all(|s| stack.contains(s)));
    assert!(old.iter().all(|s| !stack.contains(s)));
    assert_eq!(shell.window(W).unwrap().current_page, page);
    assert!(shell
        .backend()
        .posted(W, ChromeTarget::Header)
        .contains(&&ChromeMessage::UpdateCurrentPage(page)));
}

#[test]
fn switch_to_current_or_unknown_page_is_a_noop() {
    let mut shell = shell();
    shell.backend_mut().clear_posts();
    shell.switch_page(W, PageId(1));
    shell.switch_page(W, PageId(42));
    assert!(shell.backend().posts.is_empty());
    assert_eq!(shell.window(W).unwrap().current_page, PageId(1));
}

#[test]
fn switch_page_resets_stale_active_tab() {
    let mut shell = shell();
    let page = shell.add_page();
    shell
        .windows
        .get_mut(&W)
        .unwrap()
        .active_tab
        .insert(page, 9);
    shell.switch_page(W, page);
    assert_eq!(shell.window(W).unwrap().active_tab(page), Some(0));
}

#[test]
fn switching_to_a_new_page_activates_its_first_tab() {
    let mut shell = shell();
    let page = shell.add_page();
    shell.backend_mut().clear_posts();

    shell.switch_page(W, page);

    assert_eq!(shell.window(W).unwrap().active_tab(page), Some(0));
    let first = slots(&shell, W, page)[0];
    assert_eq!(shell.backend().focused_surface, Some(first));
    assert!(shell
        .backend()
        .posted(W, ChromeTarget::Header)
        .contains(&&ChromeMessage::UpdateTabState(true)));

    shell.dispatch(W, Action::NavigateTo("https://example.com/".into()));
    assert_eq!(url(&shell, first).as_deref(), Some("https://example.com/"));
}

#[test]
fn cycle_pages_wraps() {
    let mut shell = shell();
    let page = shell.add_page();
    shell.dispatch(W, Action::CyclePages);
    assert_eq!(shell.window(W).unwrap().current_page, page);
    shell.dispatch(W, Action::CyclePages);
    assert_eq!(shell.window(W).unwrap().current_page, PageId(1));
}

#[test]
fn deleting_the_only_page_asks_to_close_the_app() {
    let mut shell = shell();
    shell.dispatch(W, Action::DeletePageFromPopup(PageId(1)));

    assert_eq!(shell.pages().len(), 1);
    assert!(shell.backend().cleared.is_empty());
    assert_eq!(
        last_popup(&shell),
        Some(ChromeMessage::ShowConfirmClose(PageId(1)))
    );
    assert!(shell.backend().overlay(W, OverlayKind::Popup).visible);
    assert!(shell.backend().overlay(W, OverlayKind::Popup).interactive);
}

#[test]
fn last_page_popup_names_the_requested_page() {
    let mut shell = shell();
    let page = shell.add_page();
    shell.dispatch(W, Action::DeletePageFromPopup(PageId(1)));
    assert_eq!(shell.pages().len(), 1);
    shell.backend_mut().clear_posts();

    shell.dispatch(W, Action::DeletePageFromPopup(page));
    assert_eq!(shell.pages().len(), 1);
    assert_eq!(
        last_popup(&shell),
        Some(ChromeMessage::ShowConfirmClose(page))
    );
}

#[test]
fn confirm_popup_depends_on_page_count() {
    let mut shell = shell();
    shell.dispatch(W, Action::ShowConfirmPopup(PageId(1)));
    assert_eq!(
        last_popup(&shell),
        Some(ChromeMessage::ShowConfirmClose(PageId(1)))
    );
    let page = shell.add_page();
    shell.dispatch(W, Action::ShowConfirmPopup(page));
    assert_eq!(last_popup(&shell), Some(ChromeMessage::ShowConfirm(page)));
}

#[test]
fn deleting_the_current_page_falls_back_to_first() {
    let mut shell = shell();
    let page = shell.add_page();
    let doomed = slots(&shell, W, page);
    shell.switch_page(W, page);

    shell.dispatch(W, Action::DeletePageFromPopup(page));

    let state = shell.window(W).unwrap();
    assert_eq!(state.current_page, PageId(1));
    assert!(state.pool(page).is_none());
    let b = shell.backend();
    assert_eq!(b.cleared, vec!["persist:page_2".to_string()]);
    assert!(doomed.iter().all(|s| !b.surfaces.contains_key(s)));
    assert_eq!(b.window(W).stack.last(), Some(&HEADER));
    assert!(slots(&shell, W, PageId(1))
        .iter()
        .all(|s| b.window(W).stack.contains(s)));
    assert!(!b.overlay(W, OverlayKind::Popup).visible);
}

#[test]
fn confirm_close_app_discards_page_and_quits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app-state.json");
    let mut shell = Shell::new(FakeBackend::new(), MosaicConfig::default(), Some(path.clone()));
    shell.start(None).unwrap();

    shell.dispatch(W, Action::ConfirmCloseApp(PageId(1)));

    assert!(shell.backend().quit);
    assert_eq!(shell.backend().cleared, vec!["persist:page_1".to_string()]);
    let saved = load_snapshot(&path).unwrap();
    assert!(saved.pages.is_empty());
    assert_eq!(saved.deleted_page_numbers, vec![1]);
}

#[test]
fn rename_trims_and_broadcasts() {
    let mut shell = shell();
    shell.dispatch(
        W,
        Action::RenamePage {
            page: PageId(1),
            name: "  Work ".into(),
        },
    );
    assert_eq!(shell.pages().get(PageId(1)).unwrap().name, "Work");
    let header = shell.backend().posted(W, ChromeTarget::Header);
    let Some(ChromeMessage::UpdateState(state)) = header
        .iter()
        .rev()
        .find(|m| matches!(m, ChromeMessage::UpdateState(_)))
    else {
        panic!("no update-state");
    };
    assert_eq!(state.pages[0].name, "Work");

    shell.dispatch(
        W,
        Action::RenamePage {
            page: PageId(1),
            name: "   ".into(),
        },
    );
    assert_eq!(shell.pages().get(PageId(1)).unwrap().name, "Work");
}

#[test]
fn reorder_by_index() {
    let mut shell = shell();
    shell.add_page();
    shell.add_page();
    shell.dispatch(
        W,
        Action::ReorderPagesToIndex {
            source: PageId(1),
            index: 3,
        },
    );
    assert_eq!(shell.pages().ids(), vec![PageId(2), PageId(3), PageId(1)]);
    shell.dispatch(
        W,
        Action::ReorderPages {
            source: PageId(1),
            target: PageId(2),
        },
    );
    assert_eq!(shell.pages().ids(), vec![PageId(1), PageId(2), PageId(3)]);
}

// =========================================================================
// Tabs
// =========================================================================

#[test]
fn delete_shifts_later_tabs_left() {
    let mut shell = shell();
    let s = slots(&shell, W, PageId(1));
    for (surface, addr) in s.iter().zip(["https://a/", "https://b/", "https://c/", "https://d/"]) {
        shell.backend_mut().load_url(*surface, addr);
    }

    shell.dispatch(W, Action::DeleteSpecificTab(1));

    assert_eq!(shell.window(W).unwrap().tab_count(PageId(1)), 3);
    assert_eq!(url(&shell, s[0]).as_deref(), Some("https://a/"));
    assert_eq!(url(&shell, s[1]).as_deref(), Some("https://c/"));
    assert_eq!(url(&shell, s[2]).as_deref(), Some("https://d/"));
    assert_eq!(shell.backend().surface(s[3]).bounds, Rect::ZERO);
    assert!(!shell.backend().surface(s[2]).bounds.is_empty());
}

#[test]
fn deleting_before_active_tab_keeps_it_in_place() {
    let mut shell = shell();
    shell.activate_tab(W, PageId(1), 3);
    shell.delete_specific_tab(W, 0).unwrap();
    assert_eq!(shell.window(W).unwrap().active_tab(PageId(1)), Some(2));
}

#[test]
fn deleting_the_last_tab_prompts_instead() {
    let mut shell = shell();
    for _ in 0..3 {
        shell.delete_specific_tab(W, 0).unwrap();
    }
    assert_eq!(shell.window(W).unwrap().tab_count(PageId(1)), 1);

    shell.dispatch(W, Action::DeleteSpecificTab(0));
    assert_eq!(shell.window(W).unwrap().tab_count(PageId(1)), 1);
    assert_eq!(
        last_popup(&shell),
        Some(ChromeMessage::ShowConfirmClose(PageId(1)))
    );

    let page = shell.add_page();
    shell.dispatch(W, Action::DeleteSpecificTab(0));
    assert_eq!(
        last_popup(&shell),
        Some(ChromeMessage::ShowConfirm(PageId(1)))
    );
    assert!(shell.pages().contains(page));
}

#[test]
fn out_of_range_delete_changes_nothing() {
    let mut shell = shell();
    shell.dispatch(W, Action::DeleteSpecificTab(9));
    shell.dispatch(W, Action::DeleteSpecificTab(-1));
    assert_eq!(shell.window(W).unwrap().tab_count(PageId(1)), 4);
}

#[test]
fn add_tab_stops_at_twelve() {
    let mut shell = shell();
    for _ in 0..8 {
        shell.add_tab(W, false).unwrap();
    }
    assert_eq!(shell.window(W).unwrap().tab_count(PageId(1)), 12);
    let surfaces = shell.backend().surfaces.len();

    shell.dispatch(W, Action::AddTab { activate: true });

    assert_eq!(shell.window(W).unwrap().tab_count(PageId(1)), 12);
    assert_eq!(shell.backend().surfaces.len(), surfaces);
    assert_eq!(
        last_popup(&shell),
        Some(ChromeMessage::ShowError("Maximum 12 tabs allowed!".into()))
    );
}

#[test]
fn add_tab_loads_and_activates_new_slot() {
    let mut shell = shell();
    let s = slots(&shell, W, PageId(1));
    shell.dispatch(W, Action::AddTab { activate: true });

    let state = shell.window(W).unwrap();
    assert_eq!(state.tab_count(PageId(1)), 5);
    assert_eq!(state.active_tab(PageId(1)), Some(4));
    assert_eq!(
        url(&shell, s[4]).as_deref(),
        Some("mosaic://localhost/start.html")
    );
    assert_eq!(shell.backend().focused_surface, Some(s[4]));

    // Layout follows after the short delay.
    shell.backend_mut().advance(Duration::from_millis(50));
    shell.tick();
    assert!(!shell.backend().surface(s[4]).bounds.is_empty());
}

#[test]
fn activate_tab_highlights_once() {
    let mut shell = shell();
    let s = slots(&shell, W, PageId(1));
    shell.dispatch(
        W,
        Action::TabClicked {
            page: PageId(1),
            tab: 2,
        },
    );
    assert_eq!(shell.window(W).unwrap().active_tab(PageId(1)), Some(2));
    let scripts = shell.backend().surface(s[2]).scripts.len();
    assert!(scripts > 0);

    shell.dispatch(
        W,
        Action::TabClicked {
            page: PageId(1),
            tab: 2,
        },
    );
    assert_eq!(shell.backend().surface(s[2]).scripts.len(), scripts);
}

#[test]
fn clicks_on_hidden_pages_are_ignored() {
    let mut shell = shell();
    let page = shell.add_page();
    shell.dispatch(W, Action::TabClicked { page, tab: 1 });
    assert_eq!(shell.window(W).unwrap().active_tab(page), None);
}

#[test]
fn cycle_tabs_is_throttled() {
    let mut shell = shell();
    shell.dispatch(W, Action::CycleTabs);
    assert_eq!(shell.window(W).unwrap().active_tab(PageId(1)), Some(0));
    shell.dispatch(W, Action::CycleTabs);
    assert_eq!(shell.window(W).unwrap().active_tab(PageId(1)), Some(0));

    shell.backend_mut().advance(Duration::from_millis(200));
    shell.dispatch(W, Action::CycleTabs);
    assert_eq!(shell.window(W).unwrap().active_tab(PageId(1)), Some(1));
}

#[test]
fn delete_mode_shows_tab_outlines_and_escape_cancels() {
    let mut shell = shell();
    shell.dispatch(W, Action::EnterDeleteMode);

    assert!(shell.window(W).unwrap().delete_mode);
    let overlay = shell.backend().overlay(W, OverlayKind::DeleteMode);
    assert!(overlay.visible && overlay.interactive);
    let posted = shell
        .backend()
        .posted(W, ChromeTarget::Overlay(OverlayKind::DeleteMode));
    let Some(ChromeMessage::ActivateDeleteMode(rects)) = posted.last() else {
        panic!("delete mode not activated");
    };
    assert_eq!(rects.len(), 4);
    assert_eq!(rects[0], Rect::new(0.0, 80.0, 600.0, 410.0));

    assert!(shell.handle_key(W, &KeyCombo::plain("Escape")));
    assert!(!shell.window(W).unwrap().delete_mode);
    assert!(!shell.backend().overlay(W, OverlayKind::DeleteMode).visible);
    assert_eq!(shell.window(W).unwrap().tab_count(PageId(1)), 4);
}

// =========================================================================
// Zoom and navigation
// =========================================================================

#[test]
fn zoom_is_clamped_and_idempotent() {
    let mut shell = shell();
    let s = slots(&shell, W, PageId(1));
    shell.set_zoom(120);
    shell.set_zoom(120);
    assert_eq!(shell.zoom(), 120);

    shell.set_zoom(200);
    shell.dispatch(W, Action::ZoomIn);
    assert_eq!(shell.zoom(), 200);

    shell.set_zoom(50);
    shell.dispatch(W, Action::ZoomOut);
    assert_eq!(shell.zoom(), 50);
    assert!((shell.backend().surface(s[7]).zoom - 0.5).abs() < f64::EPSILON);
    assert!(shell
        .backend()
        .posted(W, ChromeTarget::Header)
        .contains(&&ChromeMessage::UpdateZoom(50)));
}

#[test]
fn navigation_reapplies_zoom() {
    let mut shell = shell();
    let s = slots(&shell, W, PageId(1));
    shell.set_zoom(150);
    shell.backend_mut().set_zoom(s[0], 1.0);
    shell.on_surface_event(
        s[0],
        SurfaceEvent::Navigated {
            url: "https://a/".into(),
        },
    );
    assert!((shell.backend().surface(s[0]).zoom - 1.5).abs() < f64::EPSILON);
}

#[test]
fn back_and_forward_act_on_active_tab() {
    let mut shell = shell();
    let s = slots(&shell, W, PageId(1));
    shell.backend_mut().load_url(s[1], "https://b/");
    shell.activate_tab(W, PageId(1), 1);

    shell.dispatch(W, Action::NavigateBack);
    assert_eq!(
        url(&shell, s[1]).as_deref(),
        Some("mosaic://localhost/start.html")
    );
    shell.dispatch(W, Action::NavigateBack);
    assert_eq!(
        url(&shell, s[1]).as_deref(),
        Some("mosaic://localhost/start.html")
    );
    shell.dispatch(W, Action::NavigateForward);
    assert_eq!(url(&shell, s[1]).as_deref(), Some("https://b/"));
}

#[test]
fn navigate_to_loads_into_active_tab() {
    let mut shell = shell();
    let s = slots(&shell, W, PageId(1));
    shell.dispatch(W, Action::NavigateTo("https://x/".into()));
    assert_eq!(
        url(&shell, s[0]).as_deref(),
        Some("mosaic://localhost/start.html")
    );
    shell.activate_tab(W, PageId(1), 0);
    shell.dispatch(W, Action::NavigateTo("https://x/".into()));
    assert_eq!(url(&shell, s[0]).as_deref(), Some("https://x/"));
}

// =========================================================================
// Surface events
// =========================================================================

#[test]
fn main_frame_failure_shows_error_page() {
    let mut shell = shell();
    let s = slots(&shell, W, PageId(1));
    let fail = |code: i32, url: &str, main_frame: bool| SurfaceEvent::LoadFailed {
        code,
        description: "failed".into(),
        url: url.into(),
        main_frame,
    };

    shell.on_surface_event(s[0], fail(-3, "https://a/", true));
    shell.on_surface_event(s[0], fail(-105, "https://a/", false));
    shell.on_surface_event(s[0], fail(-6, "file:///missing.html", true));
    assert_eq!(
        url(&shell, s[0]).as_deref(),
        Some("mosaic://localhost/start.html")
    );

    shell.on_surface_event(s[0], fail(-105, "https://a/", true));
    assert_eq!(
        url(&shell, s[0]).as_deref(),
        Some("mosaic://localhost/error.html?code=-105&desc=failed&url=https%3A%2F%2Fa%2F")
    );
}

#[test]
fn loader_hides_when_current_tabs_finish() {
    let mut shell = shell();
    let s = slots(&shell, W, PageId(1));
    assert_eq!(last_popup(&shell), Some(ChromeMessage::ShowInitialLoader));
    assert!(shell.backend().overlay(W, OverlayKind::Popup).visible);

    let finished = |url: &str| SurfaceEvent::LoadFinished { url: url.into() };
    for surface in &s[..3] {
        shell.on_surface_event(*surface, finished("https://a/"));
    }
    assert!(shell.backend().overlay(W, OverlayKind::Popup).visible);

    shell.on_surface_event(s[3], finished("https://a/"));
    assert_eq!(last_popup(&shell), Some(ChromeMessage::HideInitialLoader));
    assert!(!shell.backend().overlay(W, OverlayKind::Popup).visible);
}

#[test]
fn loader_has_a_backstop() {
    let mut shell = shell();
    shell.backend_mut().advance(Duration::from_millis(2000));
    shell.tick();
    assert_eq!(last_popup(&shell), Some(ChromeMessage::HideInitialLoader));
    assert!(!shell.backend().overlay(W, OverlayKind::Popup).visible);
}

#[test]
fn header_load_refreshes_state() {
    let mut shell = shell();
    shell.backend_mut().clear_posts();
    shell.on_surface_event(
        HEADER,
        SurfaceEvent::LoadFinished {
            url: "mosaic://localhost/header.html".into(),
        },
    );
    let posted = shell.backend().posted(W, ChromeTarget::Header);
    assert!(matches!(posted[0], ChromeMessage::UpdateState(s) if s.zoom_level == 100));
    assert_eq!(posted[1], &ChromeMessage::UpdateTabState(false));
}

// =========================================================================
// Search, settings, focus
// =========================================================================

#[test]
fn search_pins_to_target_tab() {
    let mut shell = shell();
    let s = slots(&shell, W, PageId(1));
    shell.dispatch(W, Action::OpenSearch);

    let overlay = shell.backend().overlay(W, OverlayKind::SearchBox);
    assert!(overlay.visible && overlay.interactive);
    assert_eq!(overlay.bounds, Rect::new(100.0, 130.0, 600.0, 410.0));
    assert_eq!(shell.backend().surface(s[0]).css.len(), 1);
    let posted = shell
        .backend()
        .posted(W, ChromeTarget::Overlay(OverlayKind::SearchBox));
    assert_eq!(
        posted.last(),
        Some(&&ChromeMessage::ActivateSearch {
            bounds: Rect::new(0.0, 80.0, 600.0, 410.0),
            current_url: "mosaic://localhost/start.html".into(),
        })
    );
}

#[test]
fn perform_search_keeps_box_open() {
    let mut shell = shell();
    let s = slots(&shell, W, PageId(1));
    shell.dispatch(W, Action::OpenSearch);
    shell.dispatch(W, Action::PerformSearch("rust lang".into()));

    assert_eq!(
        url(&shell, s[0]).as_deref(),
        Some("https://www.google.com/search?q=rust%20lang")
    );
    assert!(shell.backend().surface(s[0]).css.is_empty());
    assert!(shell.backend().overlay(W, OverlayKind::SearchBox).visible);
}

#[test]
fn closing_search_with_a_click_selects_that_tab() {
    let mut shell = shell();
    let s = slots(&shell, W, PageId(1));
    shell.dispatch(W, Action::OpenSearch);
    shell.dispatch(W, Action::CloseSearch(Some(ClickPoint { x: 700.0, y: 100.0 })));

    let state = shell.window(W).unwrap();
    assert!(state.search.is_none());
    assert_eq!(state.active_tab(PageId(1)), Some(1));
    let b = shell.backend();
    assert!(!b.overlay(W, OverlayKind::SearchBox).visible);
    assert!(!b.overlay(W, OverlayKind::SearchBox).interactive);
    assert!(b.surface(s[0]).css.is_empty());
    assert_eq!(
        b.overlay(W, OverlayKind::SearchBox).bounds,
        Rect::new(100.0, 50.0, 1200.0, 900.0)
    );
}

#[test]
fn blur_to_own_search_box_keeps_search_open() {
    let mut shell = shell();
    shell.dispatch(W, Action::OpenSearch);

    shell.on_focus_changed(W, false);
    shell.tick();
    assert!(shell.window(W).unwrap().search.is_some());

    shell.backend_mut().focus = None;
    shell.on_focus_changed(W, false);
    shell.tick();
    assert!(shell.window(W).unwrap().search.is_none());
    assert!(shell.hotkeys().is_suspended());
    assert!(!shell.handle_key(W, &KeyCombo::plain("F11")));

    shell.on_focus_changed(W, true);
    assert!(!shell.hotkeys().is_suspended());
}

#[test]
fn capture_suspension_survives_focus_changes() {
    let mut shell = shell();
    shell.dispatch(W, Action::SuspendHotkeys);
    shell.on_focus_changed(W, true);
    assert!(shell.hotkeys().is_suspended());
    shell.dispatch(W, Action::ResumeHotkeys);
    assert!(!shell.hotkeys().is_suspended());
}

#[test]
fn saving_settings_rebinds_and_relayouts() {
    let mut shell = shell();
    let s = slots(&shell, W, PageId(1));
    shell.dispatch(W, Action::OpenSettings);
    assert!(shell.backend().overlay(W, OverlayKind::Settings).visible);

    shell.dispatch(
        W,
        Action::SaveSettings(json!({
            "defaultTabs": 2,
            "layoutPreset": "columns_4",
            "hotkeys": { "search": "F11" }
        })),
    );

    let settings = shell.settings();
    assert_eq!(settings.hotkeys.search, "F11");
    assert_eq!(settings.hotkeys.fullscreen, "");
    assert_eq!(
        shell.backend().surface(s[0]).bounds,
        Rect::new(0.0, 80.0, 300.0, 820.0)
    );
    let posted = shell
        .backend()
        .posted(W, ChromeTarget::Overlay(OverlayKind::Settings));
    assert!(matches!(posted.last(), Some(ChromeMessage::SettingsData(s)) if s.default_tabs == 2));

    assert!(shell.handle_key(W, &KeyCombo::plain("F11")));
    assert!(shell.window(W).unwrap().search.is_some());
    assert!(!shell.window(W).unwrap().fullscreen);

    let page = shell.add_page();
    assert_eq!(shell.window(W).unwrap().tab_count(page), 2);

    shell.dispatch(W, Action::CloseSettings);
    assert!(!shell.backend().overlay(W, OverlayKind::Settings).visible);
}

#[test]
fn respelled_accelerator_takes_over_the_key() {
    let mut shell = shell();
    shell.dispatch(
        W,
        Action::SaveSettings(json!({ "hotkeys": { "search": "CmdOrCtrl+t" } })),
    );

    let hotkeys = &shell.settings().hotkeys;
    assert_eq!(hotkeys.search, "CmdOrCtrl+t");
    assert_eq!(hotkeys.add_tab, "");

    let mac = cfg!(target_os = "macos");
    let combo = KeyCombo::from_parts(!mac, false, false, mac, "t");
    assert!(shell.handle_key(W, &combo));
    assert!(shell.window(W).unwrap().search.is_some());
    assert_eq!(shell.window(W).unwrap().tab_count(PageId(1)), 4);
}

#[test]
fn malformed_settings_are_ignored() {
    let mut shell = shell();
    shell.dispatch(W, Action::SaveSettings(json!({"defaultTabs": "many"})));
    assert_eq!(shell.settings().default_tabs, 4);
}

#[test]
fn popup_release_hides_and_refocuses() {
    let mut shell = shell();
    shell.dispatch(W, Action::ShowConfirmPopup(PageId(1)));
    shell.dispatch(W, Action::SetPopupInteractive(false));
    let popup = shell.backend().overlay(W, OverlayKind::Popup);
    assert!(!popup.visible && !popup.interactive);
    assert_eq!(shell.backend().focus.map(|f| f.overlay), Some(None));
}

// =========================================================================
// IPC and hotkeys
// =========================================================================

#[test]
fn tab_content_can_only_report_clicks_and_keys() {
    let mut shell = shell();
    let s = slots(&shell, W, PageId(1));

    shell.handle_ipc(IpcSource::Surface(s[0]), "add-page", &Value::Null);
    assert_eq!(shell.pages().len(), 1);

    shell.handle_ipc(
        IpcSource::Surface(s[2]),
        "tab-clicked",
        &json!({"pageId": 1, "tabIndex": 2}),
    );
    assert_eq!(shell.window(W).unwrap().active_tab(PageId(1)), Some(2));

    shell.handle_ipc(IpcSource::Surface(s[2]), "keydown", &json!({"key": "F11"}));
    assert!(shell.window(W).unwrap().fullscreen);

    shell.handle_ipc(IpcSource::Surface(HEADER), "add-page", &Value::Null);
    assert_eq!(shell.pages().len(), 2);

    shell.handle_ipc(
        IpcSource::Overlay(W, OverlayKind::Popup),
        "set-popup-mouse-events",
        &json!(true),
    );
    assert!(shell.backend().overlay(W, OverlayKind::Popup).interactive);
}

#[test]
fn tab_click_uses_the_senders_own_slot() {
    let mut shell = shell();
    let s = slots(&shell, W, PageId(1));

    shell.handle_ipc(
        IpcSource::Surface(s[2]),
        "tab-clicked",
        &json!({"pageId": 1, "tabIndex": 3}),
    );
    assert_eq!(shell.window(W).unwrap().active_tab(PageId(1)), Some(2));

    let page = shell.add_page();
    shell.handle_ipc(
        IpcSource::Surface(s[1]),
        "tab-clicked",
        &json!({"pageId": page.0, "tabIndex": 0}),
    );
    assert_eq!(shell.window(W).unwrap().active_tab(PageId(1)), Some(1));
    assert_eq!(shell.window(W).unwrap().active_tab(page), None);
}

#[test]
fn unknown_ipc_is_dropped() {
    let mut shell = shell();
    shell.backend_mut().clear_posts();
    shell.handle_ipc(IpcSource::Surface(HEADER), "format-disk", &Value::Null);
    shell.handle_ipc(IpcSource::Surface(SurfaceId(9999)), "add-page", &Value::Null);
    assert!(shell.backend().posts.is_empty());
    assert_eq!(shell.pages().len(), 1);
}

#[test]
fn unbound_keys_fall_through() {
    let mut shell = shell();
    assert!(!shell.handle_key(W, &KeyCombo::plain("Q")));
}

// =========================================================================
// Windows and persistence
// =========================================================================

#[test]
fn closing_windows_destroys_surfaces_and_quits_last() {
    let mut shell = shell();
    shell.dispatch(W, Action::NewWindow);
    let second = WindowId(2);
    let owned = shell.window(second).unwrap().all_surfaces();

    shell.dispatch(second, Action::CloseWindow);
    assert!(shell.window(second).is_none());
    assert!(owned.iter().all(|s| shell.backend().destroyed.contains(s)));
    assert!(!shell.backend().quit);

    shell.dispatch(W, Action::CloseWindow);
    assert!(shell.backend().quit);
    assert_eq!(shell.backend().closed, vec![second, W]);
}

#[test]
fn closing_a_window_cancels_its_timers() {
    let mut shell = shell();
    shell.dispatch(W, Action::NewWindow);
    let second = WindowId(2);
    shell.on_resized(second);
    shell.close_window(second);
    assert!(!shell.scheduler.is_pending(crate::scheduler::Task::Layout(second)));
}

#[test]
fn saves_are_debounced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app-state.json");
    let mut shell = Shell::new(FakeBackend::new(), MosaicConfig::default(), Some(path.clone()));
    shell.start(None).unwrap();

    shell.backend_mut().advance(Duration::from_millis(999));
    shell.tick();
    assert!(!path.exists());

    shell.backend_mut().advance(Duration::from_millis(1));
    shell.tick();
    assert!(path.exists());
}

#[test]
fn snapshot_round_trips_through_restore() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app-state.json");
    let mut shell = Shell::new(FakeBackend::new(), MosaicConfig::default(), Some(path.clone()));
    shell.start(None).unwrap();

    let second = shell.add_page();
    let third = shell.add_page();
    shell.add_page();
    shell.delete_page(third).unwrap();
    shell.switch_page(W, second);
    shell.add_tab(W, true).unwrap();
    shell.set_zoom(130);
    shell.dispatch(
        W,
        Action::SaveSettings(json!({
            "defaultTabs": 6,
            "layoutPreset": "one_big_left",
            "hotkeys": { "search": "CommandOrControl+K" }
        })),
    );
    let first_slot = slots(&shell, W, PageId(1))[0];
    shell.backend_mut().load_url(first_slot, "https://a.example/");

    shell.save_now();
    let saved = load_snapshot(&path).unwrap();
    assert_eq!(saved, shell.snapshot());
    assert_eq!(saved.windows[0].page_tabs[&second], 5);
    assert_eq!(saved.deleted_page_numbers, vec![3]);

    let mut restored = Shell::new(FakeBackend::new(), MosaicConfig::default(), None);
    restored.start(Some(saved.clone())).unwrap();
    assert_eq!(restored.snapshot(), saved);
    assert_eq!(restored.window(W).unwrap().current_page, second);
    assert_eq!(restored.zoom(), 130);
}

#[test]
fn restore_falls_back_for_unknown_current_page() {
    let mut saved = shell().snapshot();
    saved.windows[0].current_page = Some(PageId(77));
    saved.windows[0].page_tabs.clear();
    saved.global_zoom_level = 0;

    let mut restored = Shell::new(FakeBackend::new(), MosaicConfig::default(), None);
    restored.start(Some(saved)).unwrap();
    let state = restored.window(W).unwrap();
    assert_eq!(state.current_page, PageId(1));
    assert_eq!(state.tab_count(PageId(1)), 4);
    assert_eq!(restored.zoom(), 100);
}

#[test]
fn restore_reapplies_window_flags() {
    let mut saved = shell().snapshot();
    saved.windows[0].is_maximized = true;
    saved.windows[0].is_full_screen = true;

    let mut restored = Shell::new(FakeBackend::new(), MosaicConfig::default(), None);
    restored.start(Some(saved)).unwrap();
    let fake = restored.backend().window(W);
    assert!(fake.maximized && fake.fullscreen);
    assert_eq!(
        restored.backend().surface(HEADER).bounds,
        Rect::new(0.0, -80.0, 1200.0, 80.0)
    );
}

#[test]
fn save_is_skipped_without_windows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app-state.json");
    let mut shell = Shell::new(FakeBackend::new(), MosaicConfig::default(), Some(path.clone()));
    shell.save_now();
    assert!(!path.exists());
}
