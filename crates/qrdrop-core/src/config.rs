//! Configuration module
//!
//! Configuration is read from the environment (with `.env` support via
//! dotenvy). Validation is strict where the expiry guarantees depend on it:
//! the sweep interval must stay at or below a quarter of the TTL so that
//! unread objects never outlive their deadline by more than a small fraction
//! of it.

use std::env;
use std::time::Duration;

/// Blob backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobBackend {
    /// Files under `LOCAL_STORAGE_PATH`.
    Local,
    /// In-process map, nothing survives a restart. Useful for tests and demos.
    Memory,
}

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_TTL_SECONDS: u64 = 1200; // 20 minutes
const DEFAULT_MAX_PAYLOAD_MB: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// Base URL embedded into download links and the token image.
    pub public_base_url: String,
    pub cors_origins: Vec<String>,
    pub storage_backend: BlobBackend,
    pub local_storage_path: Option<String>,
    pub ttl_seconds: u64,
    pub sweep_interval_seconds: u64,
    pub max_payload_bytes: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let server_port = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", server_port));

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let storage_backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "local".to_string())
            .to_lowercase()
            .as_str()
        {
            "local" => BlobBackend::Local,
            "memory" => BlobBackend::Memory,
            other => {
                return Err(anyhow::anyhow!(
                    "STORAGE_BACKEND must be 'local' or 'memory', got '{}'",
                    other
                ))
            }
        };

        let ttl_seconds: u64 = env::var("TTL_SECONDS")
            .unwrap_or_else(|_| DEFAULT_TTL_SECONDS.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("TTL_SECONDS must be a valid number"))?;

        // Default sweep cadence is TTL/4 so staleness stays bounded.
        let sweep_interval_seconds = match env::var("SWEEP_INTERVAL_SECONDS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("SWEEP_INTERVAL_SECONDS must be a valid number"))?,
            Err(_) => (ttl_seconds / 4).max(1),
        };

        let max_payload_bytes = match env::var("MAX_PAYLOAD_BYTES") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_PAYLOAD_BYTES must be a valid number"))?,
            Err(_) => DEFAULT_MAX_PAYLOAD_MB * 1024 * 1024,
        };

        let config = Config {
            server_port,
            public_base_url,
            cors_origins,
            storage_backend,
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            ttl_seconds,
            sweep_interval_seconds,
            max_payload_bytes,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.ttl_seconds == 0 {
            return Err(anyhow::anyhow!("TTL_SECONDS must be greater than zero"));
        }

        if self.sweep_interval_seconds == 0 {
            return Err(anyhow::anyhow!(
                "SWEEP_INTERVAL_SECONDS must be greater than zero"
            ));
        }

        // interval <= TTL/4 keeps unread-but-expired objects around for at
        // most a small fraction of the TTL.
        if self.sweep_interval_seconds > (self.ttl_seconds / 4).max(1) {
            return Err(anyhow::anyhow!(
                "SWEEP_INTERVAL_SECONDS ({}) must not exceed TTL_SECONDS / 4 ({})",
                self.sweep_interval_seconds,
                (self.ttl_seconds / 4).max(1)
            ));
        }

        if self.max_payload_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_PAYLOAD_BYTES must be greater than zero"));
        }

        if self.storage_backend == BlobBackend::Local && self.local_storage_path.is_none() {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH must be set when using the local storage backend"
            ));
        }

        if self.public_base_url.is_empty() {
            return Err(anyhow::anyhow!("PUBLIC_BASE_URL must not be empty"));
        }

        Ok(())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env vars are process-global, so every from_env test takes this lock
    // and starts from a scrubbed environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ALL_VARS: &[&str] = &[
        "PORT",
        "PUBLIC_BASE_URL",
        "CORS_ORIGINS",
        "STORAGE_BACKEND",
        "LOCAL_STORAGE_PATH",
        "TTL_SECONDS",
        "SWEEP_INTERVAL_SECONDS",
        "MAX_PAYLOAD_BYTES",
    ];

    fn from_env_with(vars: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for key in ALL_VARS {
            env::remove_var(key);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = Config::from_env();
        for key in ALL_VARS {
            env::remove_var(key);
        }
        result
    }

    #[test]
    fn from_env_applies_defaults() {
        let config = from_env_with(&[("STORAGE_BACKEND", "memory")]).unwrap();

        assert_eq!(config.server_port, 4000);
        assert_eq!(config.public_base_url, "http://localhost:4000");
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
        assert_eq!(config.ttl_seconds, 1200);
        assert_eq!(config.sweep_interval_seconds, 300);
        assert_eq!(config.max_payload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.storage_backend, BlobBackend::Memory);
    }

    #[test]
    fn from_env_sweep_default_tracks_ttl() {
        let config = from_env_with(&[
            ("STORAGE_BACKEND", "memory"),
            ("TTL_SECONDS", "400"),
        ])
        .unwrap();
        assert_eq!(config.sweep_interval_seconds, 100);

        // Tiny TTLs still get a nonzero cadence.
        let config = from_env_with(&[
            ("STORAGE_BACKEND", "memory"),
            ("TTL_SECONDS", "2"),
        ])
        .unwrap();
        assert_eq!(config.sweep_interval_seconds, 1);
    }

    #[test]
    fn from_env_rejects_unparseable_numbers() {
        assert!(from_env_with(&[
            ("STORAGE_BACKEND", "memory"),
            ("PORT", "not-a-port"),
        ])
        .is_err());
        assert!(from_env_with(&[
            ("STORAGE_BACKEND", "memory"),
            ("TTL_SECONDS", "twenty-minutes"),
        ])
        .is_err());
        assert!(from_env_with(&[
            ("STORAGE_BACKEND", "memory"),
            ("SWEEP_INTERVAL_SECONDS", "soon"),
        ])
        .is_err());
        assert!(from_env_with(&[
            ("STORAGE_BACKEND", "memory"),
            ("MAX_PAYLOAD_BYTES", "10mb"),
        ])
        .is_err());
    }

    #[test]
    fn from_env_rejects_unknown_backend() {
        assert!(from_env_with(&[("STORAGE_BACKEND", "s3")]).is_err());
    }

    #[test]
    fn from_env_reads_full_local_configuration() {
        let config = from_env_with(&[
            ("PORT", "8080"),
            ("PUBLIC_BASE_URL", "https://drop.example.com"),
            ("CORS_ORIGINS", "https://a.example.com, https://b.example.com"),
            ("STORAGE_BACKEND", "LOCAL"),
            ("LOCAL_STORAGE_PATH", "/var/lib/qrdrop"),
            ("TTL_SECONDS", "600"),
            ("SWEEP_INTERVAL_SECONDS", "60"),
            ("MAX_PAYLOAD_BYTES", "1048576"),
        ])
        .unwrap();

        assert_eq!(config.server_port, 8080);
        assert_eq!(config.public_base_url, "https://drop.example.com");
        assert_eq!(
            config.cors_origins,
            vec![
                "https://a.example.com".to_string(),
                "https://b.example.com".to_string()
            ]
        );
        assert_eq!(config.storage_backend, BlobBackend::Local);
        assert_eq!(
            config.local_storage_path.as_deref(),
            Some("/var/lib/qrdrop")
        );
        assert_eq!(config.ttl_seconds, 600);
        assert_eq!(config.sweep_interval_seconds, 60);
        assert_eq!(config.max_payload_bytes, 1_048_576);
    }

    #[test]
    fn from_env_validation_failure_propagates() {
        // Local backend without a path fails inside from_env, not later.
        assert!(from_env_with(&[("STORAGE_BACKEND", "local")]).is_err());
    }

    fn valid_config() -> Config {
        Config {
            server_port: 4000,
            public_base_url: "http://localhost:4000".to_string(),
            cors_origins: vec!["*".to_string()],
            storage_backend: BlobBackend::Memory,
            local_storage_path: None,
            ttl_seconds: 1200,
            sweep_interval_seconds: 300,
            max_payload_bytes: 10 * 1024 * 1024,
        }
    }

    #[test]
    fn default_shape_validates() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn sweep_interval_above_quarter_ttl_rejected() {
        let mut config = valid_config();
        config.sweep_interval_seconds = 301;
        assert!(config.validate().is_err());

        config.sweep_interval_seconds = 300;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_ttl_rejected() {
        let mut config = valid_config();
        config.ttl_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn local_backend_requires_path() {
        let mut config = valid_config();
        config.storage_backend = BlobBackend::Local;
        assert!(config.validate().is_err());

        config.local_storage_path = Some("/var/lib/qrdrop".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn durations_come_from_seconds() {
        let config = valid_config();
        assert_eq!(config.ttl(), Duration::from_secs(1200));
        assert_eq!(config.sweep_interval(), Duration::from_secs(300));
    }
}
