use tracing::Level;

/// Environment variable enabling SQL debug logging (`1`, `true`, `yes`, `on`).
pub const ENV_DEBUG: &str = "SQLBUILD_DEBUG";

/// Environment variable overriding the SQL truncation length (`0` disables truncation).
pub const ENV_MAX_SQL_LENGTH: &str = "SQLBUILD_MAX_SQL_LENGTH";

/// Configuration for a [`Context`](crate::Context).
///
/// By default, SQL debug logging is disabled and must be explicitly enabled.
#[derive(Debug, Clone)]
pub struct ContextConfig {
    /// Whether every statement is logged before it runs.
    pub debug: bool,
    /// Tracing event level for statement logs.
    pub log_level: Level,
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl ContextConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `SQLBUILD_DEBUG` and `SQLBUILD_MAX_SQL_LENGTH`.
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_DEBUG) {
            config.debug = matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        if let Some(len) = lookup(ENV_MAX_SQL_LENGTH).and_then(|v| v.trim().parse::<usize>().ok()) {
            config.max_sql_length = (len > 0).then_some(len);
        }
        config
    }

    /// Enable or disable statement logging.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Override the tracing event level.
    pub fn log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }
}
