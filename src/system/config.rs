//! Silo configuration: nested per-component settings, with sensible defaults and TOML loading.

// Layer 1: Standard library
use std::time::Duration;

// Layer 2: Third-party
use serde::{Deserialize, Serialize};

// Layer 3: Internal
use crate::ring::DEFAULT_VIRTUAL_NODES_PER_SILO;

/// Default mailbox capacity for bounded mailboxes.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 1000;

/// Default timeout for actor spawn operations (5 seconds).
pub const DEFAULT_SPAWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Default timeout for graceful system shutdown (30 seconds).
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Default maximum concurrent actors (0 = unlimited).
pub const DEFAULT_MAX_ACTORS: usize = 0;

/// Mailbox-layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailboxConfig {
    /// Default bounded-mailbox capacity for newly activated actors.
    pub capacity: usize,
    /// Backpressure mode applied when a mailbox is at capacity.
    pub backpressure: crate::mailbox::BackpressureMode,
}

impl Default for MailboxConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_MAILBOX_CAPACITY,
            backpressure: crate::mailbox::BackpressureMode::default(),
        }
    }
}

/// Cluster membership configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// How long a silo may go without a heartbeat before being marked suspect.
    pub suspect_after: Duration,
    /// How long a suspect silo may remain unconfirmed before eviction.
    pub evict_after: Duration,
    /// Virtual nodes per silo on the consistent hash ring.
    pub vnodes_per_silo: u32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            suspect_after: Duration::from_secs(10),
            evict_after: Duration::from_secs(30),
            vnodes_per_silo: DEFAULT_VIRTUAL_NODES_PER_SILO,
        }
    }
}

/// Actor directory cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// How long a cached `(actor_key -> silo)` entry is trusted before re-resolution.
    pub ttl: Duration,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
        }
    }
}

/// Dead-letter queue configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DlqConfig {
    /// Maximum dead letters retained before the oldest is evicted.
    pub capacity: usize,
    /// How many delivery attempts the retry handler makes before dead-lettering for good.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay the retry backoff can reach.
    pub max_delay: Duration,
    /// Growth factor applied per additional attempt.
    pub multiplier: f64,
    /// Fractional jitter applied as `delay * (1 ± jitter)`.
    pub jitter: f64,
}

impl Default for DlqConfig {
    fn default() -> Self {
        let backoff = crate::dlq::RetryBackoff::default();
        Self {
            capacity: 10_000,
            max_retries: backoff.max_retries,
            initial_delay: backoff.initial_delay,
            max_delay: backoff.max_delay,
            multiplier: backoff.multiplier,
            jitter: backoff.jitter,
        }
    }
}

/// Reminder service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// How often the reminder scan loop checks for due reminders.
    pub scan_interval: Duration,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            scan_interval: Duration::from_secs(5),
        }
    }
}

/// Stream broker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Per-subscriber broadcast channel capacity.
    pub subscriber_buffer: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            subscriber_buffer: 256,
        }
    }
}

/// Live migration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// How strictly source/target actor implementation versions must agree to migrate.
    pub version_compatibility: crate::migration::VersionCompatibilityMode,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            version_compatibility: crate::migration::VersionCompatibilityMode::default(),
        }
    }
}

/// HTTP diagnostics surface configuration (`http-diagnostics` feature).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Whether to bind the diagnostics HTTP server at all.
    pub enabled: bool,
    /// Address to bind the diagnostics server to.
    pub bind_addr: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bind_addr: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Silo-wide configuration: the aggregate of every component's settings.
///
/// Generalizes the teacher's single-level `SystemConfig` into nested per-component configs,
/// since a silo owns far more subsystems (cluster membership, directory, DLQ, reminders,
/// streams, migration) than a single-process actor system did.
///
/// # Examples
///
/// ```rust
/// use meshforge::system::SiloConfig;
///
/// let config = SiloConfig::default();
/// assert_eq!(config.mailbox.capacity, 1000);
///
/// let config = SiloConfig::builder()
///     .with_mailbox_capacity(500)
///     .build()
///     .unwrap();
/// assert_eq!(config.mailbox.capacity, 500);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiloConfig {
    /// Mailbox-layer settings.
    pub mailbox: MailboxConfig,
    /// Cluster membership settings.
    pub cluster: ClusterConfig,
    /// Actor directory cache settings.
    pub directory: DirectoryConfig,
    /// Dead-letter queue settings.
    pub dlq: DlqConfig,
    /// Reminder service settings.
    pub reminder: ReminderConfig,
    /// Stream broker settings.
    pub stream: StreamConfig,
    /// Live migration settings.
    pub migration: MigrationConfig,
    /// HTTP diagnostics settings.
    pub diagnostics: DiagnosticsConfig,
    /// Timeout for actor activation operations.
    pub spawn_timeout: Duration,
    /// Timeout for graceful silo shutdown.
    pub shutdown_timeout: Duration,
    /// Maximum concurrently activated actors (0 = unlimited).
    pub max_actors: usize,
}

impl SiloConfig {
    /// Create a new configuration builder.
    pub fn builder() -> SiloConfigBuilder {
        SiloConfigBuilder::default()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.mailbox.capacity == 0 {
            return Err("mailbox.capacity must be > 0".to_string());
        }
        if self.spawn_timeout.is_zero() {
            return Err("spawn_timeout must be > 0".to_string());
        }
        if self.shutdown_timeout.is_zero() {
            return Err("shutdown_timeout must be > 0".to_string());
        }
        if self.cluster.vnodes_per_silo == 0 {
            return Err("cluster.vnodes_per_silo must be > 0".to_string());
        }
        Ok(())
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// Load and parse configuration from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::system::SiloError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| crate::system::SiloError::Config(e.to_string()))?;
        Self::from_toml_str(&contents).map_err(|e| crate::system::SiloError::Config(e.to_string()))
    }
}

// `spawn_timeout`/`shutdown_timeout`/`max_actors` need defaults distinct from
// `#[derive(Default)]`'s zeroed primitives; `SiloConfigBuilder` seeds them explicitly instead.

/// Builder for [`SiloConfig`] with a fluent API, mirroring the teacher's `SystemConfigBuilder`.
#[derive(Debug)]
pub struct SiloConfigBuilder {
    config: SiloConfig,
}

impl Default for SiloConfigBuilder {
    fn default() -> Self {
        Self {
            config: SiloConfig {
                spawn_timeout: DEFAULT_SPAWN_TIMEOUT,
                shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
                max_actors: DEFAULT_MAX_ACTORS,
                ..Default::default()
            },
        }
    }
}

impl SiloConfigBuilder {
    /// Set the default bounded-mailbox capacity.
    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.config.mailbox.capacity = capacity;
        self
    }

    /// Set the mailbox backpressure mode.
    pub fn with_backpressure(mut self, mode: crate::mailbox::BackpressureMode) -> Self {
        self.config.mailbox.backpressure = mode;
        self
    }

    /// Set the timeout for actor activation operations.
    pub fn with_spawn_timeout(mut self, timeout: Duration) -> Self {
        self.config.spawn_timeout = timeout;
        self
    }

    /// Set the timeout for graceful silo shutdown.
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.config.shutdown_timeout = timeout;
        self
    }

    /// Set the maximum number of concurrently activated actors (0 = unlimited).
    pub fn with_max_actors(mut self, max: usize) -> Self {
        self.config.max_actors = max;
        self
    }

    /// Set the number of virtual nodes per silo on the hash ring.
    pub fn with_vnodes_per_silo(mut self, vnodes: u32) -> Self {
        self.config.cluster.vnodes_per_silo = vnodes;
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<SiloConfig, String> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SiloConfig::default();
        assert!(config.spawn_timeout.is_zero()); // raw Default, not the builder's seeded value
    }

    #[test]
    fn test_builder_seeds_nonzero_timeouts() {
        let config = SiloConfig::builder().build().unwrap();
        assert_eq!(config.spawn_timeout, DEFAULT_SPAWN_TIMEOUT);
        assert_eq!(config.shutdown_timeout, DEFAULT_SHUTDOWN_TIMEOUT);
        assert_eq!(config.mailbox.capacity, DEFAULT_MAILBOX_CAPACITY);
    }

    #[test]
    fn test_builder_with_mailbox_capacity() {
        let config = SiloConfig::builder().with_mailbox_capacity(500).build().unwrap();
        assert_eq!(config.mailbox.capacity, 500);
    }

    #[test]
    fn test_builder_validation_rejects_zero_capacity() {
        let result = SiloConfig::builder().with_mailbox_capacity(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SiloConfig::builder().with_mailbox_capacity(250).build().unwrap();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed = SiloConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed.mailbox.capacity, 250);
    }

    #[test]
    fn test_from_toml_str_rejects_garbage() {
        assert!(SiloConfig::from_toml_str("not valid toml {{{").is_err());
    }

    #[test]
    fn test_serialization_json() {
        let config = SiloConfig::builder().build().unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SiloConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.mailbox.capacity, deserialized.mailbox.capacity);
    }
}
