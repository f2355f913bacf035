use super::*;
use crate::settings::Settings;
use mosaic_common::types::{PageId, Rect};
use mosaic_tiling::LayoutPreset;
use tempfile::TempDir;

fn populated() -> StateSnapshot {
    let mut settings = Settings {
        default_tabs: 6,
        layout_preset: LayoutPreset::OneBigLeft,
        ..Default::default()
    };
    settings.hotkeys.search = "CommandOrControl+K".into();

    let mut window = WindowSnapshot {
        bounds: Some(Rect::new(40.0, 60.0, 1280.0, 800.0)),
        is_maximized: true,
        current_page: Some(PageId(3)),
        ..Default::default()
    };
    window.page_tabs.insert(PageId(1), 2);
    window.page_tabs.insert(PageId(3), 5);
    window.tab_urls.insert(
        PageId(1),
        vec!["https://a.example/".into(), "https://b.example/".into()],
    );

    StateSnapshot {
        pages: vec![PageRecord::new(PageId(1)), PageRecord::new(PageId(3))],
        next_page_id: Some(4),
        deleted_page_numbers: vec![2],
        global_zoom_level: 130,
        settings: Some(settings),
        windows: vec![window],
    }
}

#[test]
fn page_record_defaults_follow_id() {
    let page = PageRecord::new(PageId(7));
    assert_eq!(page.name, "Session 7");
    assert_eq!(page.session_id, "persist:page_7");
}

#[test]
fn snapshot_uses_camel_case_and_string_map_keys() {
    let json = serde_json::to_value(populated()).unwrap();
    assert_eq!(json["nextPageId"], 4);
    assert_eq!(json["deletedPageNumbers"][0], 2);
    assert_eq!(json["globalZoomLevel"], 130);
    assert_eq!(json["pages"][1]["sessionId"], "persist:page_3");
    assert_eq!(json["windows"][0]["isMaximized"], true);
    assert_eq!(json["windows"][0]["pageTabs"]["3"], 5);
    assert_eq!(json["windows"][0]["tabUrls"]["1"][1], "https://b.example/");
    assert_eq!(json["settings"]["layoutPreset"], "one_big_left");
}

#[test]
fn save_then_load_reproduces_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app-state.json");
    let snapshot = populated();

    save_snapshot(&path, &snapshot).unwrap();
    let loaded = load_snapshot(&path).unwrap();
    assert_eq!(loaded, snapshot);
}

#[test]
fn missing_file_is_none() {
    let dir = TempDir::new().unwrap();
    assert!(load_snapshot(&dir.path().join("absent.json")).is_none());
}

#[test]
fn corrupt_file_is_none() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app-state.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(load_snapshot(&path).is_none());
}

#[test]
fn sparse_document_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app-state.json");
    std::fs::write(
        &path,
        r#"{"pages": [{"id": 1, "name": "Home", "sessionId": "persist:page_1"}]}"#,
    )
    .unwrap();

    let loaded = load_snapshot(&path).unwrap();
    assert_eq!(loaded.pages.len(), 1);
    assert_eq!(loaded.next_page_id, None);
    assert_eq!(loaded.global_zoom_level, 0);
    assert!(loaded.settings.is_none());
    assert!(loaded.windows.is_empty());
}
