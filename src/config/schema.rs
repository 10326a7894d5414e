//! Configuration schema.
//!
//! ```yaml
//! update_interval: 1s
//! scroll_interval: 1s
//! snapshot: metrics.yml
//! cache:
//!   max_age: 5m
//!   cleanup_interval: 1m
//! templates:
//!   0: '${cpu \1}%'
//! text: |
//!   CPU: ${cpu}%
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{CacheCleanupConfig, DEFAULT_CLEANUP_INTERVAL, DEFAULT_MAX_AGE};
use crate::engine::EngineBuilder;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConkyConfig {
    /// Pause between renders when repeating.
    #[serde(with = "duration_text")]
    pub update_interval: Duration,

    /// Time per `${scroll}` step.
    #[serde(with = "duration_text")]
    pub scroll_interval: Duration,

    /// Metric snapshot file, relative to the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,

    /// Cache janitor settings.
    pub cache: CacheSettings,

    /// Bodies for `template0` to `template9`, keyed by slot.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub templates: BTreeMap<usize, String>,

    /// Template rendered when none is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Default for ConkyConfig {
    fn default() -> Self {
        Self {
            update_interval: Duration::from_secs(1),
            scroll_interval: Duration::from_secs(1),
            snapshot: None,
            cache: CacheSettings::default(),
            templates: BTreeMap::new(),
            text: None,
        }
    }
}

impl ConkyConfig {
    /// Apply scroll, cache and template settings to an engine builder.
    pub fn apply(&self, builder: EngineBuilder) -> EngineBuilder {
        let builder = builder
            .scroll_tick(self.scroll_interval)
            .cleanup(self.cache.cleanup_config());
        self.templates
            .iter()
            .fold(builder, |b, (slot, body)| b.template(*slot, body.clone()))
    }
}

/// The `cache:` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Evict entries not accessed for this long.
    #[serde(with = "duration_text")]
    pub max_age: Duration,

    /// Pause between janitor sweeps.
    #[serde(with = "duration_text")]
    pub cleanup_interval: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }
}

impl CacheSettings {
    /// Convert to the engine's cleanup configuration.
    pub fn cleanup_config(&self) -> CacheCleanupConfig {
        CacheCleanupConfig::new(self.max_age, self.cleanup_interval)
    }
}

/// Durations written as `500ms`, `30s`, `5m`, `1h`, `1d` or bare seconds.
mod duration_text {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;
    use std::time::Duration;

    use crate::format::parse_duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        if duration.subsec_millis() == 0 {
            serializer.serialize_str(&format!("{}s", duration.as_secs()))
        } else {
            serializer.serialize_str(&format!("{}ms", duration.as_millis()))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        deserializer.deserialize_any(DurationVisitor)
    }

    struct DurationVisitor;

    impl Visitor<'_> for DurationVisitor {
        type Value = Duration;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a duration such as `30s`, `5m` or a number of seconds")
        }

        fn visit_u64<E: de::Error>(self, secs: u64) -> Result<Duration, E> {
            Ok(Duration::from_secs(secs))
        }

        fn visit_i64<E: de::Error>(self, secs: i64) -> Result<Duration, E> {
            u64::try_from(secs)
                .map(Duration::from_secs)
                .map_err(|_| E::custom("duration must not be negative"))
        }

        fn visit_f64<E: de::Error>(self, secs: f64) -> Result<Duration, E> {
            Duration::try_from_secs_f64(secs).map_err(E::custom)
        }

        fn visit_str<E: de::Error>(self, text: &str) -> Result<Duration, E> {
            parse_duration(text).map_err(|e| E::custom(format!("invalid duration `{text}`: {e}")))
        }
    }
}
