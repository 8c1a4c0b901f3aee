use chrono::NaiveDate;
use fleetlens_core::heatmap::WeightConfig;
use fleetlens_core::temporal::DEFAULT_FARE_PER_OCCUPIED_PING;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`). Doubles as the
    /// deadline for long-running aggregations: when it fires, in-flight
    /// query futures are dropped and their connections return to the pool.
    pub request_timeout_secs: u64,
    /// Maximum database connections (default: `5`).
    pub db_max_connections: u32,
    /// Connection acquire deadline in seconds (default: `10`); exceeding it
    /// surfaces as a connection-timeout error.
    pub db_acquire_timeout_secs: u64,
    /// Reference date used when the ping table is empty and the corpus day
    /// cannot be derived (default: `2013-09-12`, the demo dataset's day).
    pub reference_date_fallback: NaiveDate,
    /// Estimated fare credited per occupied ping (default: `15`). A business
    /// heuristic for the revenue chart, not measured fare data.
    pub fare_per_occupied_ping: f64,
    /// Optional ceiling on heatmap point weights (`HEATMAP_WEIGHT_CAP`,
    /// unset by default — the documented maximum is 7.5).
    pub heatmap_weight_cap: Option<f64>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default      |
    /// |---------------------------|--------------|
    /// | `HOST`                    | `0.0.0.0`    |
    /// | `PORT`                    | `3000`       |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`         |
    /// | `DB_MAX_CONNECTIONS`      | `5`          |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `10`         |
    /// | `REFERENCE_DATE`          | `2013-09-12` |
    /// | `FARE_PER_OCCUPIED_PING`  | `15`         |
    /// | `HEATMAP_WEIGHT_CAP`      | unset        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let db_acquire_timeout_secs: u64 = std::env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("DB_ACQUIRE_TIMEOUT_SECS must be a valid u64");

        let reference_date_fallback: NaiveDate = std::env::var("REFERENCE_DATE")
            .unwrap_or_else(|_| "2013-09-12".into())
            .parse()
            .expect("REFERENCE_DATE must be YYYY-MM-DD");

        let fare_per_occupied_ping: f64 = std::env::var("FARE_PER_OCCUPIED_PING")
            .map(|raw| raw.parse().expect("FARE_PER_OCCUPIED_PING must be numeric"))
            .unwrap_or(DEFAULT_FARE_PER_OCCUPIED_PING);

        let heatmap_weight_cap: Option<f64> = std::env::var("HEATMAP_WEIGHT_CAP")
            .ok()
            .map(|raw| raw.parse().expect("HEATMAP_WEIGHT_CAP must be numeric"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            db_max_connections,
            db_acquire_timeout_secs,
            reference_date_fallback,
            fare_per_occupied_ping,
            heatmap_weight_cap,
        }
    }

    /// The heatmap weighting factors with the configured cap applied.
    pub fn weight_config(&self) -> WeightConfig {
        WeightConfig {
            cap: self.heatmap_weight_cap,
            ..WeightConfig::default()
        }
    }
}
