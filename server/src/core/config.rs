use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/pizzeria | Work directory (database, logs) |
/// | HTTP_PORT | 5000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | STRIPE_SECRET_KEY | (empty) | Stripe API secret key |
/// | STRIPE_CURRENCY | usd | Checkout currency |
///
/// JWT settings are read separately by [`JwtConfig`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory for the embedded database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT settings
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Stripe API secret key; checkout fails without it
    pub stripe_secret_key: String,
    /// Currency for payment intents
    pub stripe_currency: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/pizzeria".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            stripe_secret_key: std::env::var("STRIPE_SECRET_KEY").unwrap_or_default(),
            stripe_currency: std::env::var("STRIPE_CURRENCY").unwrap_or_else(|_| "usd".into()),
        }
    }

    /// Override work dir and port, for tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Directory the embedded database lives in
    pub fn database_dir(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.work_dir).join("database")
    }

    /// Directory log files roll into
    pub fn log_dir(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.work_dir).join("logs")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
