use std::sync::Once;
use std::time::Instant;
use tracing::{debug, error, info, Level};

static INIT: Once = Once::new();

/// Install the global fmt subscriber at `level`. Only the first call has
/// any effect.
pub fn init_logger(level: &str) {
    INIT.call_once(|| {
        let level = parse_level(level);

        // `try_init` also bridges `log` records from dependencies
        let result = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .try_init();

        match result {
            Ok(()) => info!("Logging initialized at {}", level),
            Err(e) => eprintln!("Logger already installed, keeping existing one: {}", e),
        }
    });
}

fn parse_level(level: &str) -> Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// One-line log formats shared across modules
pub struct LogContext;

impl LogContext {
    /// HTTP call start (no duration) or finish
    pub fn api_call(provider: &str, endpoint: &str, status: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(ms) => info!("API: {} {} {} in {}ms", provider, endpoint, status, ms),
            None => debug!("API: {} {} {}", provider, endpoint, status),
        }
    }

    /// Search issued (`results == None`) or accepted
    pub fn search_operation(query: &str, token: Option<u64>, results: Option<usize>) {
        match (token, results) {
            (Some(t), Some(r)) => info!("Search: '{}' (#{}) returned {} results", query, t, r),
            (Some(t), None) => debug!("Search: Starting '{}' (#{})", query, t),
            (None, Some(r)) => info!("Search: '{}' returned {} results", query, r),
            (None, None) => debug!("Search: Starting '{}'", query),
        }
    }

    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }
}

/// Logs elapsed wall time when finished
pub struct TimedOperation {
    start: Instant,
    operation: String,
}

impl TimedOperation {
    pub fn start(operation: impl Into<String>) -> Self {
        let operation = operation.into();
        debug!("Starting: {}", operation);
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// Elapsed milliseconds, logged together with `detail`
    pub fn finish(self, detail: Option<&str>) -> u64 {
        let elapsed = self.start.elapsed().as_millis() as u64;
        match detail {
            Some(detail) => info!("Timing: {} took {}ms ({})", self.operation, elapsed, detail),
            None => info!("Timing: {} took {}ms", self.operation, elapsed),
        }
        elapsed
    }
}
