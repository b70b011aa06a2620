use winstack::global::{self, SharedRegistry};
use winstack::prefs::{JsonFilePreferences, PreferenceStore};
use winstack::{
    HeadlessBackend, RegistryConfig, WidgetBackend, WindowCatalog, WindowError, WindowKind,
    WindowRegistry, WindowTemplate,
};

fn build(config: RegistryConfig) -> SharedRegistry {
    let catalog = WindowCatalog::new().with("Menu", WindowKind::new(WindowTemplate::default()));
    let backend: Box<dyn WidgetBackend> = Box::new(HeadlessBackend::new());
    WindowRegistry::new(catalog, backend).with_config(config)
}

#[test]
fn lifecycle_init_use_shutdown_reinit() {
    assert!(matches!(
        global::with_registry(|r| r.open_count()),
        Err(WindowError::Uninitialized)
    ));

    global::get_or_init(|| build(RegistryConfig::default())).expect("init");
    let id = global::with_registry(|r| r.create("Menu", None))
        .expect("initialized")
        .expect("create");
    // a second lazy init keeps the existing instance
    global::get_or_init(|| build(RegistryConfig::default())).expect("noop");
    assert_eq!(global::with_registry(|r| r.topmost()).ok(), Some(Some(id)));

    assert_eq!(global::shutdown().ok(), Some(true));
    assert!(!global::is_initialized());

    global::get_or_init(|| build(RegistryConfig::default())).expect("reinit");
    assert_eq!(global::with_registry(|r| r.open_count()).ok(), Some(0));
    global::shutdown().expect("shutdown");
}

#[test]
fn failed_init_leaves_slot_empty() {
    let result = global::init(build(RegistryConfig::default().with_screen(0, 0)));
    assert!(matches!(result, Err(WindowError::InvalidResolution { .. })));
    assert!(!global::is_initialized());
}

#[test]
fn dpi_preference_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("prefs").join("settings.json");

    let first = build(RegistryConfig::default())
        .with_preferences(JsonFilePreferences::open(&path).expect("open"));
    global::init(first).expect("init");
    global::with_registry(|r| r.set_dpi(1920, 1080, 1.5))
        .expect("initialized")
        .expect("set dpi");
    global::shutdown().expect("shutdown");

    let stored = JsonFilePreferences::open(&path).expect("reopen");
    assert_eq!(stored.dpi_setting(), 1.5);

    let second = build(RegistryConfig::default()).with_preferences(stored);
    global::init(second).expect("init again");
    assert_eq!(global::with_registry(|r| r.scaler().dpi()).ok(), Some(1.5));
    global::shutdown().expect("shutdown");
}
