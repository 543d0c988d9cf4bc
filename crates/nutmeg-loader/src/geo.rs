//! User position acquisition for the "Near Me" view.
//!
//! A [`PositionSource`] is whatever can answer "where is the user": a
//! browser bridge, a fixed point from the command line, a test double.
//! [`Locator`] wraps one with the request policy: a single outstanding
//! request at a time, a hard timeout, and a short-lived cached fix.

use std::future::Future;
use std::time::Duration;

use nutmeg_core::{AppConfig, Coordinates};
use tokio::sync::Mutex;
use tokio::time::Instant;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(300);

/// Why a position could not be obtained. Codes follow the browser
/// geolocation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeoError {
    #[error("Location access denied. Please enable location services and try again.")]
    PermissionDenied,
    #[error("Location unavailable. Please try again.")]
    PositionUnavailable,
    #[error("Location request timed out. Please try again.")]
    Timeout,
    #[error("Geolocation is not supported on this device.")]
    Unsupported,
    #[error("Unable to get your location.")]
    Unknown,
}

impl GeoError {
    /// Map a browser error code (`1`, `2`, `3`) to a variant.
    #[must_use]
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeoError::PermissionDenied,
            2 => GeoError::PositionUnavailable,
            3 => GeoError::Timeout,
            _ => GeoError::Unknown,
        }
    }

    #[must_use]
    pub fn code(self) -> Option<u16> {
        match self {
            GeoError::PermissionDenied => Some(1),
            GeoError::PositionUnavailable => Some(2),
            GeoError::Timeout => Some(3),
            GeoError::Unsupported | GeoError::Unknown => None,
        }
    }
}

pub trait PositionSource: Send + Sync {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, GeoError>> + Send;
}

/// A position known up front, e.g. from `--lat/--lng`.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

impl PositionSource for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, GeoError> {
        Ok(self.0)
    }
}

/// For environments with no way to locate the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl PositionSource for Unsupported {
    async fn current_position(&self) -> Result<Coordinates, GeoError> {
        Err(GeoError::Unsupported)
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedFix {
    coordinates: Coordinates,
    taken_at: Instant,
}

pub struct Locator<S> {
    source: S,
    timeout: Duration,
    max_age: Duration,
    last_fix: Mutex<Option<CachedFix>>,
}

impl<S: PositionSource> Locator<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_policy(source, DEFAULT_TIMEOUT, DEFAULT_MAX_AGE)
    }

    #[must_use]
    pub fn with_policy(source: S, timeout: Duration, max_age: Duration) -> Self {
        Self {
            source,
            timeout,
            max_age,
            last_fix: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn from_config(source: S, config: &AppConfig) -> Self {
        Self::with_policy(
            source,
            Duration::from_secs(config.geo_timeout_secs),
            Duration::from_secs(config.geo_max_age_secs),
        )
    }

    /// Resolve the user's position.
    ///
    /// Calls are serialized: a second caller waits for the first request to
    /// finish and then reuses its fix if it is younger than `max_age`.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Timeout`] if the source does not answer within the
    /// timeout, or whatever error the source reports.
    pub async fn locate(&self) -> Result<Coordinates, GeoError> {
        let mut last_fix = self.last_fix.lock().await;

        if let Some(fix) = *last_fix {
            if fix.taken_at.elapsed() < self.max_age {
                tracing::debug!("reusing cached position");
                return Ok(fix.coordinates);
            }
        }

        let result = tokio::time::timeout(self.timeout, self.source.current_position())
            .await
            .unwrap_or(Err(GeoError::Timeout));

        match result {
            Ok(coordinates) => {
                *last_fix = Some(CachedFix {
                    coordinates,
                    taken_at: Instant::now(),
                });
            }
            Err(err) => tracing::warn!(code = ?err.code(), error = %err, "position request failed"),
        }

        result
    }
}
