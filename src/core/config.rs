//! Game configuration.
//!
//! Hosts configure a game by providing:
//! - the ordered list of distinct images (one pair is dealt per image)
//! - timing: how long a mismatched pair stays up, how often the clock ticks
//! - presentation: board columns and the victory message template
//! - an optional seed for reproducible decks
//!
//! Configs can be built in code with the `with_*` builders or loaded from
//! JSON. Every field has a default, so `{}` is a valid config file.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::clock::ElapsedTime;
use super::image::{ImageRef, ImageSet};
use crate::error::{Error, Result};

/// Images used when a config does not list its own.
pub const DEFAULT_IMAGES: [&str; 8] = [
    "./images/cereza.jpg",
    "./images/flor.jpg",
    "./images/girasol.jpg",
    "./images/hoja.jpg",
    "./images/hongo.jpg",
    "./images/nomo.jpg",
    "./images/nuez.jpg",
    "./images/tronco.jpg",
];

/// Default victory template. `{attempts}` and `{elapsed}` are substituted.
pub const DEFAULT_VICTORY_MESSAGE: &str = "You won in {attempts} attempts and {elapsed}!";

/// What happens to the selection when a pair does not match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchPolicy {
    /// Clear the selection as soon as the pair is evaluated. The player can
    /// start a new pair while the mismatched tiles are still face up.
    #[default]
    ReleaseImmediately,
    /// Keep both tiles selected until they flip back. Clicks in between are
    /// ignored.
    LockUntilRevert,
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Distinct images, in board-independent order.
    pub images: Vec<ImageRef>,

    /// How long a mismatched pair stays face up, in milliseconds.
    pub mismatch_delay_ms: u64,

    /// Clock refresh period, in milliseconds.
    pub tick_interval_ms: u64,

    /// Tiles per board row when rendered.
    pub columns: usize,

    /// Seed for dealing. `None` seeds from the operating system.
    pub seed: Option<u64>,

    /// Victory notice template.
    pub victory_message: String,

    pub mismatch_policy: MismatchPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            images: DEFAULT_IMAGES.iter().copied().map(ImageRef::new).collect(),
            mismatch_delay_ms: 1000,
            tick_interval_ms: 1000,
            columns: 4,
            seed: None,
            victory_message: DEFAULT_VICTORY_MESSAGE.to_string(),
            mismatch_policy: MismatchPolicy::default(),
        }
    }
}

impl GameConfig {
    /// Create a configuration for the given images, defaults elsewhere.
    pub fn new<I, T>(images: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ImageRef>,
    {
        Self {
            images: images.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Set the deal seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the mismatch delay, rounded up to whole milliseconds.
    #[must_use]
    pub fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay_ms = whole_millis(delay);
        self
    }

    /// Set the clock refresh period, rounded up to whole milliseconds.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval_ms = whole_millis(interval);
        self
    }

    /// Set the number of board columns.
    #[must_use]
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Replace the victory notice template.
    #[must_use]
    pub fn with_victory_message(mut self, template: impl Into<String>) -> Self {
        self.victory_message = template.into();
        self
    }

    /// Set the mismatch policy.
    #[must_use]
    pub fn with_mismatch_policy(mut self, policy: MismatchPolicy) -> Self {
        self.mismatch_policy = policy;
        self
    }

    #[must_use]
    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check the config and return the validated image set.
    pub fn validate(&self) -> Result<ImageSet> {
        if self.columns == 0 {
            return Err(Error::NoColumns);
        }
        if self.mismatch_delay_ms == 0 {
            return Err(Error::ZeroInterval {
                field: "mismatch_delay_ms",
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::ZeroInterval {
                field: "tick_interval_ms",
            });
        }
        if self.victory_message.trim().is_empty() {
            return Err(Error::EmptyVictoryMessage);
        }
        ImageSet::new(self.images.clone())
    }

    /// Fill in the victory template.
    #[must_use]
    pub fn victory_text(&self, attempts: u32, elapsed: ElapsedTime) -> String {
        self.victory_message
            .replace("{attempts}", &attempts.to_string())
            .replace("{elapsed}", &elapsed.to_string())
    }
}

/// Milliseconds, rounding any fraction up and saturating at `u64::MAX`.
fn whole_millis(duration: Duration) -> u64 {
    let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    if duration.subsec_nanos() % 1_000_000 == 0 {
        millis
    } else {
        millis.saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.images.len(), 8);
        assert_eq!(config.mismatch_delay(), Duration::from_secs(1));
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.columns, 4);
        assert_eq!(config.seed, None);
        assert_eq!(config.mismatch_policy, MismatchPolicy::ReleaseImmediately);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new(["a", "b"])
            .with_seed(9)
            .with_mismatch_delay(Duration::from_millis(250))
            .with_tick_interval(Duration::from_millis(500))
            .with_columns(2)
            .with_mismatch_policy(MismatchPolicy::LockUntilRevert);

        assert_eq!(config.images, vec![ImageRef::new("a"), ImageRef::new("b")]);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.mismatch_delay_ms, 250);
        assert_eq!(config.tick_interval_ms, 500);
        assert_eq!(config.columns, 2);
        assert_eq!(config.mismatch_policy, MismatchPolicy::LockUntilRevert);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let empty: [&str; 0] = [];
        assert!(matches!(GameConfig::new(empty).validate(), Err(Error::NoImages)));
        assert!(matches!(
            GameConfig::new(["a"]).with_columns(0).validate(),
            Err(Error::NoColumns)
        ));
        assert!(matches!(
            GameConfig::new(["a"]).with_mismatch_delay(Duration::ZERO).validate(),
            Err(Error::ZeroInterval { field: "mismatch_delay_ms" })
        ));
        assert!(matches!(
            GameConfig::new(["a"]).with_tick_interval(Duration::ZERO).validate(),
            Err(Error::ZeroInterval { field: "tick_interval_ms" })
        ));
        assert!(matches!(
            GameConfig::new(["a"]).with_victory_message("  ").validate(),
            Err(Error::EmptyVictoryMessage)
        ));
    }

    #[test]
    fn test_sub_millisecond_durations_round_up() {
        let config = GameConfig::new(["a"])
            .with_mismatch_delay(Duration::from_micros(300))
            .with_tick_interval(Duration::from_micros(1_500));

        assert_eq!(config.mismatch_delay_ms, 1);
        assert_eq!(config.tick_interval_ms, 2);
        assert!(config.validate().is_ok());

        let huge = GameConfig::new(["a"]).with_mismatch_delay(Duration::MAX);
        assert_eq!(huge.mismatch_delay_ms, u64::MAX);
    }

    #[test]
    fn test_victory_text() {
        let config = GameConfig::default();
        let elapsed = ElapsedTime::from_duration(Duration::from_secs(83));
        assert_eq!(config.victory_text(12, elapsed), "You won in 12 attempts and 01:23!");

        let localized = config.with_victory_message("¡Ganaste en {attempts} intentos y {elapsed}!");
        assert_eq!(localized.victory_text(3, elapsed), "¡Ganaste en 3 intentos y 01:23!");
    }
}
