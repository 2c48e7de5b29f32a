//! End-to-end check of the per-level file sinks.
//!
//! Installs the global subscriber, so this file holds a single test.

use std::fs;

use account_telemetry::{init_tracing, rotation_configs, LoggingSettings, Severity};
use chrono::Utc;

#[test]
fn events_land_in_their_level_files() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = LoggingSettings {
        directory: tmp.path().to_path_buf(),
        levels: vec![Severity::Error, Severity::Info],
        environment: "test".into(),
        pretty_print: false,
        ..LoggingSettings::default()
    };

    let guards = init_tracing(&settings).expect("subscriber should install");
    assert_eq!(guards.sinks(), 2);

    tracing::error!(project_id = 1, "disk on fire");
    tracing::info!("routine message");
    tracing::debug!("too chatty for any sink");
    {
        let span = tracing::info_span!("request", method = "POST");
        let _entered = span.enter();
        tracing::warn!("inside a request");
    }
    let panicked = std::panic::catch_unwind(|| panic!("kaboom"));
    assert!(panicked.is_err());

    // Dropping the guards flushes the non-blocking writers.
    drop(guards);

    let today = Utc::now().date_naive();
    let configs = rotation_configs(&settings);
    let read = |level: Severity| {
        let config = configs.iter().find(|c| c.level == level).unwrap();
        fs::read_to_string(config.directory.join(config.file_name(today))).unwrap()
    };

    let errors = read(Severity::Error);
    assert!(errors.contains("disk on fire"), "{errors}");
    assert!(errors.contains("project_id=1"), "{errors}");
    assert!(!errors.contains("routine message"), "{errors}");
    assert!(errors.starts_with("[test] "), "{errors}");
    assert!(errors.contains("Panic"), "{errors}");
    assert!(errors.contains("kaboom"), "{errors}");
    assert!(!errors.contains("inside a request"), "{errors}");

    let infos = read(Severity::Info);
    assert!(infos.contains("disk on fire"), "{infos}");
    assert!(infos.contains("routine message"), "{infos}");
    assert!(!infos.contains("too chatty"), "{infos}");
    assert!(
        infos.contains("request{method=\"POST\"}: inside a request"),
        "{infos}"
    );

    assert!(!tmp.path().join("debug").exists());
}
