// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use rankaudit::config::settings::Settings;

#[test]
fn test_settings_load_from_default_file() {
    let settings = Settings::new().expect("default settings should load");

    assert!(settings.audit.end_rank >= settings.audit.start_rank);
    assert!(settings.history.capacity >= 1);
    assert!(matches!(
        settings.history.storage_type.as_str(),
        "file" | "memory"
    ));
    assert!(!settings.gemini.model.is_empty());
}
