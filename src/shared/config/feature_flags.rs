//! Startup-time feature resolution
//!
//! Optional integrations (analytics, for one) may depend on configuration
//! that shows up a little after startup. Resolution probes a bounded number
//! of times and then settles on [`FeatureState::Disabled`]; the result is
//! computed once and passed around as a plain value.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureState<T> {
    Enabled(T),
    Disabled(DisabledReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisabledReason {
    /// Turned off in configuration, never probed
    NotConfigured,
    /// The probe never produced a value within the attempt budget
    TimedOut { attempts: u32 },
}

impl<T> FeatureState<T> {
    pub fn is_enabled(&self) -> bool {
        matches!(self, FeatureState::Enabled(_))
    }

    pub fn as_enabled(&self) -> Option<&T> {
        match self {
            FeatureState::Enabled(value) => Some(value),
            FeatureState::Disabled(_) => None,
        }
    }
}

/// Probe up to `attempts` times, sleeping `interval` between tries.
pub async fn resolve_feature<T, F, Fut>(
    name: &str,
    enabled: bool,
    attempts: u32,
    interval: Duration,
    mut probe: F,
) -> FeatureState<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    if !enabled {
        debug!("Feature '{}' disabled by configuration", name);
        return FeatureState::Disabled(DisabledReason::NotConfigured);
    }

    for attempt in 1..=attempts {
        if let Some(value) = probe().await {
            info!("Feature '{}' enabled after {} probe(s)", name, attempt);
            return FeatureState::Enabled(value);
        }
        if attempt < attempts {
            tokio::time::sleep(interval).await;
        }
    }

    info!(
        "Feature '{}' unavailable after {} probe(s), running without it",
        name, attempts
    );
    FeatureState::Disabled(DisabledReason::TimedOut { attempts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_disabled_flag_skips_probing() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let state: FeatureState<()> =
            resolve_feature("analytics", false, 5, Duration::from_millis(1), || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Some(()) }
            })
            .await;

        assert_eq!(state, FeatureState::Disabled(DisabledReason::NotConfigured));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_is_bounded() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let state: FeatureState<u8> =
            resolve_feature("analytics", true, 4, Duration::from_millis(50), || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { None }
            })
            .await;

        assert_eq!(
            state,
            FeatureState::Disabled(DisabledReason::TimedOut { attempts: 4 })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_succeeds_on_later_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let state = resolve_feature("analytics", true, 5, Duration::from_millis(50), || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move { (n == 3).then_some("tracking-id") }
        })
        .await;

        assert_eq!(state.as_enabled(), Some(&"tracking-id"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
