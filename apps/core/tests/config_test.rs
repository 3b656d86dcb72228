use jumplist_core::config::{self, Config, ConfigError};

#[test]
fn accepts_default_config() {
    let cfg = Config::default();
    assert_eq!(cfg.play_command, "/COMMAND=40012");
    assert_eq!(cfg.open_command, "/COMMAND=40029");
    assert!(cfg.config_path.to_string_lossy().contains("JumpList"));
    assert!(config::validate(&cfg).is_ok());
}

#[test]
fn rejects_app_id_with_spaces() {
    let cfg = Config {
        app_id: "Jump List".to_string(),
        ..Default::default()
    };
    assert!(matches!(config::validate(&cfg), Err(ConfigError::Invalid(_))));
}

#[test]
fn rejects_overlong_app_id() {
    let cfg = Config {
        app_id: "a".repeat(config::MAX_APP_ID_CHARS + 1),
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_err());
}

#[test]
fn rejects_empty_task_command_only_when_tasks_enabled() {
    let mut cfg = Config {
        play_command: String::new(),
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_err());

    cfg.tasks = false;
    assert!(config::validate(&cfg).is_ok());
}

#[test]
fn missing_file_yields_defaults_at_requested_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let cfg = config::load(Some(&path)).unwrap();

    assert_eq!(cfg.config_path, path);
    assert_eq!(cfg.app_id, Config::default().app_id);
}

#[test]
fn saves_and_reloads_toml() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config {
        app_id: "Player.Custom".to_string(),
        frequent: true,
        history_cache_id: Some("879d567ffa1f5b9f".to_string()),
        config_path: dir.path().join("nested").join("jumplist.toml"),
        ..Default::default()
    };

    config::save(&cfg).unwrap();
    let loaded = config::load(Some(&cfg.config_path)).unwrap();

    assert_eq!(loaded, cfg);
}

#[test]
fn loads_partial_json5() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jumplist.json5");
    std::fs::write(
        &path,
        "{\n  // comments are fine\n  app_id: 'Player.Json',\n  playlists: true,\n}\n",
    )
    .unwrap();

    let cfg = config::load(Some(&path)).unwrap();

    assert_eq!(cfg.app_id, "Player.Json");
    assert!(cfg.playlists);
    assert_eq!(cfg.playlist_category, "Playlists");
}

#[test]
fn reports_invalid_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jumplist.toml");
    std::fs::write(&path, "app_id = [").unwrap();

    assert!(matches!(config::load(Some(&path)), Err(ConfigError::Toml(_))));
}
