use std::path::PathBuf;
use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::Result;
use crate::sentiment::Lexicon;

/// Delay before an analysis is surfaced, matching the app's "calculating" pause.
pub const DEFAULT_DELAY_MS: u64 = 2500;

#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub lexicon_path: Option<PathBuf>,
    pub delay_ms: Option<u64>,
    pub today: Option<NaiveDate>,
}

impl Settings {
    pub fn lexicon(&self) -> Result<Lexicon> {
        match &self.lexicon_path {
            Some(path) => Lexicon::load(path),
            None => Ok(Lexicon::default()),
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms.unwrap_or(DEFAULT_DELAY_MS))
    }

    /// Reference instant for analysis: midnight of `today`, or of the local date.
    pub fn now(&self) -> NaiveDateTime {
        self.today
            .unwrap_or_else(|| Local::now().date_naive())
            .and_time(NaiveTime::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_builtin_lexicon_and_delay() {
        let settings = Settings::default();
        assert_eq!(settings.lexicon().unwrap(), Lexicon::default());
        assert_eq!(settings.delay(), Duration::from_millis(2500));
    }

    #[test]
    fn explicit_today_pins_now() {
        let settings = Settings {
            today: NaiveDate::from_ymd_opt(2024, 7, 1),
            delay_ms: Some(0),
            ..Settings::default()
        };
        assert_eq!(settings.now().to_string(), "2024-07-01 00:00:00");
        assert!(settings.delay().is_zero());
    }

    #[test]
    fn missing_lexicon_file_is_an_error() {
        let settings = Settings {
            lexicon_path: Some(std::env::temp_dir().join("no-such-lexicon.json")),
            ..Settings::default()
        };
        assert!(settings.lexicon().is_err());
    }
}
