use tickets::config::{GlobalConfig, LoggingConfig, SubmitKey, ThemeConfig};
use tickets::logging;
use tickets::ticket::TicketColor;

// === ThemeConfig Tests ===

#[test]
fn test_parse_hex_valid() {
    assert_eq!(ThemeConfig::parse_hex("#FFFFFF"), Some((255, 255, 255)));
    assert_eq!(ThemeConfig::parse_hex("#000000"), Some((0, 0, 0)));
    assert_eq!(ThemeConfig::parse_hex("#5cfff7"), Some((92, 255, 247)));
    assert_eq!(ThemeConfig::parse_hex("ead49a"), Some((234, 212, 154)));
}

#[test]
fn test_parse_hex_invalid() {
    assert_eq!(ThemeConfig::parse_hex("#FFF"), None); // Too short
    assert_eq!(ThemeConfig::parse_hex("#FFFFFFF"), None); // Too long
    assert_eq!(ThemeConfig::parse_hex("#GGGGGG"), None); // Invalid hex chars
    assert_eq!(ThemeConfig::parse_hex("#ééé"), None); // Six bytes, not six digits
    assert_eq!(ThemeConfig::parse_hex(""), None); // Empty
}

#[test]
fn test_theme_config_default() {
    let theme = ThemeConfig::default();

    // Verify all default colors are valid hex
    assert!(ThemeConfig::parse_hex(&theme.color_selected).is_some());
    assert!(ThemeConfig::parse_hex(&theme.color_normal).is_some());
    assert!(ThemeConfig::parse_hex(&theme.color_dimmed).is_some());
    assert!(ThemeConfig::parse_hex(&theme.color_text).is_some());
    assert!(ThemeConfig::parse_hex(&theme.color_popup_border).is_some());
    assert!(ThemeConfig::parse_hex(&theme.color_popup_header).is_some());
}

// === GlobalConfig Tests ===

#[test]
fn test_global_config_default() {
    let config = GlobalConfig::default();

    assert_eq!(config.default_color, TicketColor::Lightpink);
    assert_eq!(config.submit_key, SubmitKey::Enter);
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json);
}

#[test]
fn test_global_config_empty_toml_uses_defaults() {
    let config: GlobalConfig = toml::from_str("").unwrap();

    assert_eq!(config.default_color, TicketColor::Lightpink);
    assert_eq!(config.submit_key, SubmitKey::Enter);
    assert_eq!(config.theme.color_selected, ThemeConfig::default().color_selected);
}

#[test]
fn test_global_config_partial_toml() {
    let toml_str = r##"
default_color = "lightgreen"
submit_key = "shift-enter"

[theme]
color_selected = "#FF0000"

[logging]
json = true
"##;
    let config: GlobalConfig = toml::from_str(toml_str).unwrap();

    assert_eq!(config.default_color, TicketColor::Lightgreen);
    assert_eq!(config.submit_key, SubmitKey::ShiftEnter);
    assert_eq!(config.theme.color_selected, "#FF0000");
    assert_eq!(config.theme.color_normal, ThemeConfig::default().color_normal);
    assert!(config.logging.json);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_global_config_rejects_unknown_color() {
    let result: Result<GlobalConfig, _> = toml::from_str(r#"default_color = "purple""#);
    assert!(result.is_err());
}

#[test]
fn test_submit_key_shift_parses() {
    let config: GlobalConfig = toml::from_str(r#"submit_key = "shift""#).unwrap();

    assert_eq!(config.submit_key, SubmitKey::Shift);
    assert_eq!(config.submit_key.label(), "Shift");
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = GlobalConfig::default();
    config.default_color = TicketColor::Black;
    config.submit_key = SubmitKey::Shift;
    config.save_to(&path).unwrap();

    let loaded = GlobalConfig::load_from(&path).unwrap();
    assert_eq!(loaded.default_color, TicketColor::Black);
    assert_eq!(loaded.submit_key, SubmitKey::Shift);
}

#[test]
fn test_load_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let config = GlobalConfig::load_from(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.default_color, TicketColor::Lightpink);
}

#[test]
fn test_load_malformed_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "default_color = [").unwrap();

    let err = GlobalConfig::load_from(&path).unwrap_err();

    assert!(format!("{:#}", err).contains("Failed to parse config"));
}

// === Logging ===

#[test]
fn test_build_filter_falls_back_on_bad_level() {
    let config = LoggingConfig {
        level: "not a [valid directive".to_string(),
        json: false,
    };

    // Must not panic; an unparsable level degrades to "info"
    let _filter = logging::build_filter(&config);
}
