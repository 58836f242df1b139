//! Settings file loading, persistence and logger setup.

use haruhana_core_lib::services::settings_service::{SettingsService, SettingsUpdateInput};
use haruhana_core_lib::utils::logger::init_logging;
use tempfile::tempdir;

#[test]
fn missing_file_uses_defaults() {
    let dir = tempdir().expect("temp dir");
    let service =
        SettingsService::from_yaml_file(&dir.path().join("absent.yaml")).expect("defaults");
    assert_eq!(service.get().settings.timezone, "Asia/Seoul");
}

#[test]
fn saved_settings_round_trip_through_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("config").join("analytics.yaml");

    let service = SettingsService::with_defaults();
    service
        .update(SettingsUpdateInput {
            timezone: Some("America/New_York".into()),
            daily_step_goal: Some(7_500),
            ..Default::default()
        })
        .expect("update");
    service.save_yaml(&path).expect("save");

    let reloaded = SettingsService::from_yaml_file(&path).expect("reload");
    let settings = reloaded.get().settings;
    assert_eq!(settings.timezone, "America/New_York");
    assert_eq!(settings.daily_step_goal, 7_500);
}

#[test]
fn invalid_file_is_rejected() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "strideLengthM: 4.0\n").expect("write");
    assert!(SettingsService::from_yaml_file(&path)
        .err()
        .expect("should fail")
        .is_validation());

    std::fs::write(&path, "streakLookbackDays: [1, 2]\n").expect("write");
    assert!(SettingsService::from_yaml_file(&path).is_err());
}

#[test]
fn logger_initializes_once() {
    let dir = tempdir().expect("temp dir");
    init_logging(dir.path()).expect("first init");
    init_logging(dir.path()).expect("second init is a no-op");
}
