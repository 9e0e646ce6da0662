use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use hometime_composer::color::{Rgb, rgb_clamped};
use hometime_composer::frame_scheduler::{DEFAULT_TICK_INTERVAL, DIMMED_MARKER_LEVEL};
use hometime_composer::math8::level8;
use hometime_composer::{RenderConfig, WeekSchedule, Weekday, WorkBounds, parse_time_of_day};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::CalendarSettings;

/// Largest strip the daemon renders
pub const MAX_LEDS: usize = 512;

const DEFAULT_WLED_URL: &str = "http://wled.local";
const DEFAULT_WLED_TIMEOUT_MS: u64 = 5000;
/// Segment limit of stock ESP32 WLED builds
const DEFAULT_MAX_SEGMENTS: usize = 32;
const DEFAULT_CALENDAR_COMMAND: &str = "gcalcli";
const DEFAULT_CALENDAR_TIMEOUT_SECS: u64 = 30;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Config file contents. Every field is optional so CLI flags can be layered on top.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>, // e.g., "info" | "debug"
    pub tick_interval_secs: Option<u64>,
    pub wled: Option<WledConfig>,
    pub strip: Option<StripConfig>,
    pub calendar: Option<CalendarConfig>,
    /// Weekday name -> work hours. Only the first entry of a day is used.
    pub schedule: Option<BTreeMap<String, Vec<ScheduleEntry>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WledConfig {
    pub url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub max_segments: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StripConfig {
    pub led_count: Option<usize>,
    pub flip: Option<bool>,
    /// `[r, g, b]`, each channel clamped to 0..=255
    pub bar_color: Option<[i32; 3]>,
    pub event_color: Option<[i32; 3]>,
    pub current_time_color: Option<[i32; 3]>,
    pub bar_brightness: Option<u8>,
    pub flash_marker: Option<bool>,
    /// Marker intensity on the dim flash phase, 0.0..=1.0
    pub marker_dim: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalendarConfig {
    pub enabled: Option<bool>,
    pub command: Option<String>,
    /// Extra arguments placed before `agenda`
    pub args: Option<Vec<String>>,
    /// Exported as `GCALCLI_CONFIG`
    pub config_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub clockin: ClockTime,
    pub clockout: ClockTime,
}

/// `9`, `9.5`, `"9"` or `"9:30"`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClockTime {
    Hours(f64),
    Text(String),
}

impl ClockTime {
    fn hours(&self) -> Option<f64> {
        match self {
            Self::Hours(h) => Some(*h).filter(|h| (0.0..=24.0).contains(h)),
            Self::Text(s) => parse_time_of_day(s),
        }
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "hometime", about = "Work day progress on a WLED strip", version)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// Shorthand for --log-level debug
    #[arg(long, action = ArgAction::SetTrue)]
    pub debug: bool,
    #[arg(long)]
    pub wled_url: Option<String>,
    #[arg(long)]
    pub led_count: Option<usize>,
    #[arg(long, action = ArgAction::Set)]
    pub flip: Option<bool>,
    /// Do not query the calendar
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_calendar: bool,
    /// Run a single tick and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub once: bool,
    /// Log controller requests instead of sending them
    #[arg(long, action = ArgAction::SetTrue)]
    pub dry_run: bool,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Everything the daemon needs, resolved and validated
#[derive(Debug, Clone)]
pub struct Settings {
    pub render: RenderConfig,
    pub schedule: WeekSchedule,
    pub wled_url: String,
    pub wled_timeout: Duration,
    pub max_segments: usize,
    pub calendar: Option<CalendarSettings>,
    pub tick_interval: Duration,
    pub flash_marker: bool,
    pub marker_dim_level: u8,
}

/// Read YAML (explicit path or search) and layer CLI overrides on top.
pub fn load(cli: &Cli) -> Result<Config, ConfigError> {
    let mut cfg = if let Some(p) = cli.config.as_ref() {
        if !p.exists() {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
        read_yaml(p)?
    } else if let Some(p) = find_config_file() {
        read_yaml(&p)?
    } else {
        Config::default()
    };

    apply_cli_overrides(&mut cfg, cli);
    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    if let Some(home) = home_dir() {
        let p = home.join(".config/hometime/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/hometime.yaml");
        if p.exists() { return Some(p) }
    }
    for candidate in &["hometime.yaml", "config/hometime.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(s)?)
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.debug {
        cfg.log_level = Some("debug".into());
    } else if cli.log_level.is_some() {
        cfg.log_level = cli.log_level.clone();
    }
    if cli.wled_url.is_some() {
        cfg.wled.get_or_insert_with(WledConfig::default).url = cli.wled_url.clone();
    }
    if cli.led_count.is_some() || cli.flip.is_some() {
        let strip = cfg.strip.get_or_insert_with(StripConfig::default);
        if cli.led_count.is_some() { strip.led_count = cli.led_count; }
        if cli.flip.is_some()      { strip.flip = cli.flip; }
    }
    if cli.no_calendar {
        cfg.calendar.get_or_insert_with(CalendarConfig::default).enabled = Some(false);
    }
}

fn color(value: Option<[i32; 3]>, default: Rgb) -> Rgb {
    value.map_or(default, |[r, g, b]| rgb_clamped(r, g, b))
}

impl Config {
    /// Fill defaults and check invariants
    pub fn resolve(&self) -> Result<Settings, ConfigError> {
        let defaults = RenderConfig::default();
        let strip = self.strip.clone().unwrap_or_default();
        let wled = self.wled.clone().unwrap_or_default();

        let led_count = strip.led_count.unwrap_or(defaults.led_count);
        if led_count == 0 || led_count > MAX_LEDS {
            return Err(ConfigError::Validation(format!(
                "strip led_count must be in 1..={MAX_LEDS}"
            )));
        }
        let marker_dim = strip.marker_dim.map_or(DIMMED_MARKER_LEVEL, level8);

        let render = RenderConfig {
            led_count,
            flip: strip.flip.unwrap_or(defaults.flip),
            bar_color: color(strip.bar_color, defaults.bar_color),
            event_color: color(strip.event_color, defaults.event_color),
            current_time_color: color(strip.current_time_color, defaults.current_time_color),
            bar_brightness: strip.bar_brightness,
        };

        let max_segments = wled.max_segments.unwrap_or(DEFAULT_MAX_SEGMENTS);
        if max_segments == 0 {
            return Err(ConfigError::Validation("wled max_segments must be > 0".into()));
        }
        let tick_interval = self
            .tick_interval_secs
            .map_or(Duration::from_secs(DEFAULT_TICK_INTERVAL.as_secs()), Duration::from_secs);
        if tick_interval.is_zero() {
            return Err(ConfigError::Validation("tick_interval_secs must be > 0".into()));
        }

        Ok(Settings {
            render,
            schedule: self.week_schedule()?,
            wled_url: wled.url.unwrap_or_else(|| DEFAULT_WLED_URL.into()),
            wled_timeout: Duration::from_millis(wled.timeout_ms.unwrap_or(DEFAULT_WLED_TIMEOUT_MS)),
            max_segments,
            calendar: self.calendar_settings(),
            tick_interval,
            flash_marker: strip.flash_marker.unwrap_or(true),
            marker_dim_level: marker_dim,
        })
    }

    /// Build the week table; days without a schedule are days off
    fn week_schedule(&self) -> Result<WeekSchedule, ConfigError> {
        let Some(days) = self.schedule.as_ref() else {
            return Ok(WeekSchedule::new().with_weekdays(WorkBounds::new(9.0, 17.0)));
        };

        let mut schedule = WeekSchedule::new();
        for (name, entries) in days {
            let day = Weekday::parse_from_str(&name.to_lowercase()).ok_or_else(|| {
                ConfigError::Validation(format!("unknown weekday in schedule: {name}"))
            })?;
            let Some(entry) = entries.first() else {
                continue;
            };
            let clock_in = entry.clockin.hours().ok_or_else(|| {
                ConfigError::Validation(format!("invalid clockin for {name}: {:?}", entry.clockin))
            })?;
            let clock_out = entry.clockout.hours().ok_or_else(|| {
                ConfigError::Validation(format!(
                    "invalid clockout for {name}: {:?}",
                    entry.clockout
                ))
            })?;
            schedule = schedule.with_day(day, WorkBounds::new(clock_in, clock_out));
        }
        Ok(schedule)
    }

    fn calendar_settings(&self) -> Option<CalendarSettings> {
        let calendar = self.calendar.clone().unwrap_or_default();
        if !calendar.enabled.unwrap_or(true) {
            return None;
        }
        Some(CalendarSettings {
            command: calendar.command.unwrap_or_else(|| DEFAULT_CALENDAR_COMMAND.into()),
            args: calendar.args.unwrap_or_default(),
            config_path: calendar.config_path,
            timeout: Duration::from_secs(
                calendar
                    .timeout_secs
                    .unwrap_or(DEFAULT_CALENDAR_TIMEOUT_SECS),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
log_level: debug
wled:
  url: http://10.0.2.29
strip:
  led_count: 60
  flip: true
  bar_color: [0, 25, 0]
  current_time_color: [300, 80, -5]
  bar_brightness: 96
  marker_dim: 0.5
calendar:
  config_path: /opt/hometime/gcalcli.toml
schedule:
  monday:
    - clockin: "9"
      clockout: "20"
    - clockin: "10"
      clockout: "11"
  Friday:
    - clockin: "8:30"
      clockout: 16.5
  saturday:
    - clockin: "0"
      clockout: "0"
  sunday: []
"#;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("hometime").chain(args.iter().copied()))
    }

    #[test]
    fn test_resolve_sample() {
        let settings = parse_yaml(SAMPLE).unwrap().resolve().unwrap();
        assert_eq!(settings.wled_url, "http://10.0.2.29");
        assert_eq!(settings.render.led_count, 60);
        assert!(settings.render.flip);
        assert_eq!(settings.render.current_time_color, Rgb { r: 255, g: 80, b: 0 });
        assert_eq!(settings.render.event_color, RenderConfig::default().event_color);
        assert_eq!(settings.render.bar_brightness, Some(96));
        assert_eq!(settings.marker_dim_level, 128);
        assert_eq!(settings.max_segments, DEFAULT_MAX_SEGMENTS);
        assert_eq!(settings.tick_interval, Duration::from_secs(300));

        let calendar = settings.calendar.unwrap();
        assert_eq!(calendar.command, "gcalcli");
        assert_eq!(calendar.config_path, Some(PathBuf::from("/opt/hometime/gcalcli.toml")));
    }

    #[test]
    fn test_schedule_first_entry_wins() {
        let settings = parse_yaml(SAMPLE).unwrap().resolve().unwrap();
        let schedule = settings.schedule;
        assert_eq!(schedule.for_day(Weekday::Monday), WorkBounds::new(9.0, 20.0));
        assert_eq!(schedule.for_day(Weekday::Friday), WorkBounds::new(8.5, 16.5));
        assert!(schedule.for_day(Weekday::Saturday).is_day_off());
        assert!(schedule.for_day(Weekday::Sunday).is_day_off());
        assert!(schedule.for_day(Weekday::Tuesday).is_day_off());
    }

    #[test]
    fn test_defaults() {
        let settings = Config::default().resolve().unwrap();
        assert_eq!(settings.render, RenderConfig::default());
        assert_eq!(settings.wled_url, DEFAULT_WLED_URL);
        assert_eq!(settings.marker_dim_level, DIMMED_MARKER_LEVEL);
        assert!(settings.flash_marker);
        assert!(settings.calendar.is_some());
        assert!(settings.schedule.is_working(Weekday::Wednesday, 12.0));
        assert!(!settings.schedule.is_working(Weekday::Sunday, 12.0));
    }

    #[test]
    fn test_cli_overrides() {
        let mut cfg = parse_yaml(SAMPLE).unwrap();
        apply_cli_overrides(
            &mut cfg,
            &cli(&[
                "--wled-url",
                "http://strip",
                "--led-count",
                "30",
                "--flip",
                "false",
                "--no-calendar",
            ]),
        );
        let settings = cfg.resolve().unwrap();
        assert_eq!(settings.wled_url, "http://strip");
        assert_eq!(settings.render.led_count, 30);
        assert!(!settings.render.flip);
        assert!(settings.calendar.is_none());
    }

    #[test]
    fn test_debug_flag_wins() {
        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli(&["--debug", "--log-level", "warn"]));
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_rejects_bad_values() {
        let too_long = format!("strip:\n  led_count: {}\n", MAX_LEDS + 1);
        assert!(matches!(
            parse_yaml(&too_long).unwrap().resolve(),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            parse_yaml("strip:\n  led_count: 0\n").unwrap().resolve(),
            Err(ConfigError::Validation(_))
        ));
        let unknown_day = "schedule:\n  funday:\n    - clockin: 9\n      clockout: 17\n";
        assert!(matches!(
            parse_yaml(unknown_day).unwrap().resolve(),
            Err(ConfigError::Validation(_))
        ));
        let bad_minutes = "schedule:\n  monday:\n    - clockin: \"9:75\"\n      clockout: 17\n";
        assert!(matches!(
            parse_yaml(bad_minutes).unwrap().resolve(),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            parse_yaml("tick_interval_secs: 0\n").unwrap().resolve(),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(parse_yaml("strip: [1, 2"), Err(ConfigError::Yaml(_))));
    }
}
