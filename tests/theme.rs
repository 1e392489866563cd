use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use cricket_pulse::prefs::{FilePreferences, MemoryPreferences, PreferenceStore};
use cricket_pulse::theme::{THEME_KEY, Theme, init_theme, on_toggle_change};

fn scratch_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let mut dir = std::env::temp_dir();
    dir.push(format!("cricket_pulse_{name}_{}_{nanos}", std::process::id()));
    fs::create_dir_all(&dir).expect("scratch dir should be creatable");
    dir
}

#[test]
fn saved_light_checks_the_toggle() {
    let prefs = MemoryPreferences::with(THEME_KEY, "light");
    let state = init_theme(&prefs).expect("memory prefs never fail");
    assert_eq!(state.root_attr, Theme::Light);
    assert!(state.toggle_checked);
}

#[test]
fn saved_dark_leaves_toggle_unchecked() {
    let prefs = MemoryPreferences::with(THEME_KEY, "dark");
    let state = init_theme(&prefs).expect("memory prefs never fail");
    assert_eq!(state.root_attr, Theme::Dark);
    assert!(!state.toggle_checked);
}

#[test]
fn absent_or_invalid_preference_defaults_to_dark() {
    for prefs in [
        MemoryPreferences::new(),
        MemoryPreferences::with(THEME_KEY, "sepia"),
        MemoryPreferences::with(THEME_KEY, "LIGHT"),
    ] {
        let state = init_theme(&prefs).expect("memory prefs never fail");
        assert_eq!(state.root_attr, Theme::Dark);
        assert!(!state.toggle_checked);
    }
}

#[test]
fn toggling_persists_the_opposite_and_updates_root() {
    let mut prefs = MemoryPreferences::new();
    let mut state = init_theme(&prefs).unwrap();

    let next = !state.toggle_checked;
    on_toggle_change(&mut state, next, &mut prefs).unwrap();
    assert_eq!(state.root_attr, Theme::Light);
    assert!(state.toggle_checked);
    assert_eq!(prefs.get(THEME_KEY).unwrap().as_deref(), Some("light"));

    let next = !state.toggle_checked;
    on_toggle_change(&mut state, next, &mut prefs).unwrap();
    assert_eq!(state.root_attr, Theme::Dark);
    assert!(!state.toggle_checked);
    assert_eq!(prefs.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
}

#[test]
fn file_preferences_survive_reopen() {
    let dir = scratch_dir("reopen");
    let path = dir.join("nested").join("prefs.json");

    let mut prefs = FilePreferences::open(&path).expect("missing file opens empty");
    let mut state = init_theme(&prefs).unwrap();
    assert_eq!(state.root_attr, Theme::Dark);
    on_toggle_change(&mut state, true, &mut prefs).unwrap();

    let reopened = FilePreferences::open(&path).unwrap();
    let state = init_theme(&reopened).unwrap();
    assert_eq!(state.root_attr, Theme::Light);
    assert!(state.toggle_checked);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn corrupt_preferences_file_reads_as_empty() {
    let dir = scratch_dir("corrupt");
    let path = dir.join("prefs.json");
    fs::write(&path, "{ not json").unwrap();

    let prefs = FilePreferences::open(&path).expect("corrupt file is ignored");
    assert_eq!(prefs.get(THEME_KEY).unwrap(), None);
    assert_eq!(init_theme(&prefs).unwrap().root_attr, Theme::Dark);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn storage_failure_propagates_from_toggle() {
    let dir = scratch_dir("blocked");
    let path = dir.join("prefs.json");
    // Occupy the temp file slot so the atomic write cannot happen.
    fs::create_dir_all(dir.join("prefs.json.tmp")).unwrap();

    let mut prefs = FilePreferences::open(&path).unwrap();
    let mut state = init_theme(&prefs).unwrap();
    let err = on_toggle_change(&mut state, true, &mut prefs).unwrap_err();
    assert!(format!("{err:#}").contains("failed to persist theme preference"));
    // The UI state still reflects the click.
    assert_eq!(state.root_attr, Theme::Light);

    let _ = fs::remove_dir_all(dir);
}
