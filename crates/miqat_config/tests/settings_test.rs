//! Loading `miqat.toml` from disk and resolving it into a calculation config.

use std::fs;
use std::path::PathBuf;

use chrono::FixedOffset;
use miqat_config::{ConfigError, Settings};
use miqat_geo::GeoCoordinates;
use miqat_prayer::{CalculationMethod, HighLatitudeRule, IshaRule, Madhab, Prayer, PrayerError};
use miqat_time::Rounding;
use tempfile::TempDir;

const MECCA_TOML: &str = r#"
[location]
latitude = 21.4225
longitude = 39.8262
utc_offset_minutes = 180

[prayer]
method = "UmmAlQura"
madhab = "Hanafi"
high_latitude_rule = "SeventhOfTheNight"
rounding = "up"

[prayer.adjustments]
fajr = 2
isha = -1
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn full_file_round_trips_into_config() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "miqat.toml", MECCA_TOML);

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(
        settings.coordinates().unwrap(),
        Some(GeoCoordinates::new(21.4225, 39.8262))
    );
    assert_eq!(settings.utc_offset().unwrap(), FixedOffset::east_opt(3 * 3600).unwrap());

    let config = settings.calculation_config().unwrap();
    assert_eq!(config.parameters.method, Some(CalculationMethod::UmmAlQura));
    assert_eq!(config.parameters.isha, IshaRule::Interval(90));
    assert_eq!(config.parameters.rounding, Rounding::Up);
    assert_eq!(config.madhab, Madhab::Hanafi);
    assert_eq!(config.high_latitude_rule, Some(HighLatitudeRule::SeventhOfTheNight));
    assert_eq!((config.adjustments.fajr, config.adjustments.isha), (2, -1));
    assert_eq!(config.adjustments.dhuhr, 0);
}

#[test]
fn partial_prayer_section_keeps_other_defaults() {
    let settings: Settings = "[prayer]\nmethod = \"isna\"\n".parse().unwrap();
    let config = settings.calculation_config().unwrap();
    assert_eq!(config.parameters.method, Some(CalculationMethod::NorthAmerica));
    assert_eq!(config.madhab, Madhab::Shafi);
    assert_eq!(config.high_latitude_rule, Some(HighLatitudeRule::MiddleOfTheNight));
    assert_eq!(config.parameters.rounding, Rounding::Nearest);
}

#[test]
fn rule_none_disables_fallback() {
    let settings: Settings = "[prayer]\nhigh_latitude_rule = \"none\"\n".parse().unwrap();
    assert_eq!(settings.calculation_config().unwrap().high_latitude_rule, None);
}

#[test]
fn unknown_method_is_reported_by_name() {
    let settings: Settings = "[prayer]\nmethod = \"Tehran\"\n".parse().unwrap();
    let err = settings.calculation_config().unwrap_err();
    assert!(
        matches!(
            err,
            ConfigError::Prayer(PrayerError::UnknownCalculationMethod(ref key)) if key == "Tehran"
        ),
        "{err:?}"
    );
}

#[test]
fn unknown_rounding_is_rejected() {
    let settings: Settings = "[prayer]\nrounding = \"down\"\n".parse().unwrap();
    assert!(matches!(
        settings.calculation_config(),
        Err(ConfigError::UnknownRounding(_))
    ));
}

#[test]
fn sunrise_adjustment_is_not_a_key() {
    let err = "[prayer.adjustments]\nsunrise = 5\n"
        .parse::<Settings>()
        .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "{err:?}");
}

#[test]
fn huge_adjustment_is_rejected() {
    let settings: Settings = "[prayer.adjustments]\ndhuhr = 2147483647\n".parse().unwrap();
    let err = settings.calculation_config().unwrap_err();
    assert!(
        matches!(
            err,
            ConfigError::AdjustmentOutOfRange {
                prayer: Prayer::Dhuhr,
                minutes: i32::MAX
            }
        ),
        "{err:?}"
    );
}

#[test]
fn day_long_adjustments_are_accepted() {
    let settings: Settings = "[prayer.adjustments]\nfajr = -1440\nisha = 1440\n"
        .parse()
        .unwrap();
    let config = settings.calculation_config().unwrap();
    assert_eq!((config.adjustments.fajr, config.adjustments.isha), (-1440, 1440));
}

#[test]
fn out_of_range_location_fails() {
    let settings: Settings = "[location]\nlatitude = 95.0\nlongitude = 0.0\n".parse().unwrap();
    assert!(matches!(settings.coordinates(), Err(ConfigError::Geo(_))));
}

#[test]
fn bad_offset_fails() {
    let settings: Settings =
        "[location]\nlatitude = 0.0\nlongitude = 0.0\nutc_offset_minutes = 2000\n"
            .parse()
            .unwrap();
    assert!(matches!(settings.utc_offset(), Err(ConfigError::InvalidUtcOffset(2000))));
}

#[test]
fn first_existing_path_wins() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("miqat.toml");
    let nested = write(&dir, "config/miqat.toml", "[prayer]\nmethod = \"Karachi\"\n");
    let later = write(&dir, "xdg/miqat/miqat.toml", "[prayer]\nmethod = \"Dubai\"\n");

    let settings = Settings::from_first_existing(&[missing, nested, later]).unwrap();
    assert_eq!(settings.prayer.method, "Karachi");
}

#[test]
fn nothing_found_lists_searched_paths() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.toml");
    let b = dir.path().join("b.toml");
    let err = Settings::from_first_existing(&[a, b]).unwrap_err();
    match err {
        ConfigError::NotFound { searched } => {
            assert!(searched.contains("a.toml") && searched.contains("b.toml"));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Settings::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn serialized_settings_parse_back() {
    let settings: Settings = MECCA_TOML.parse().unwrap();
    let text = settings.to_toml_string().unwrap();
    assert_eq!(text.parse::<Settings>().unwrap(), settings);
}
