//! Location watching as a disposable subscription.
//!
//! # Responsibility
//! - Define the watcher capability a platform adapter implements.
//! - Guarantee the platform watch is released exactly once, on explicit
//!   `dispose()` or on drop.

use super::location::LatLng;
use log::{debug, info};
use std::cell::Cell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use std::time::Duration;

/// Parameters for a location watch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchOptions {
    /// Request the platform's highest accuracy mode.
    pub high_accuracy: bool,
    /// Minimum time between updates.
    pub time_interval: Duration,
    /// Minimum movement in meters between updates.
    pub distance_interval_m: f64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            time_interval: Duration::from_millis(1000),
            distance_interval_m: 2.0,
        }
    }
}

/// Errors raised when a watch cannot start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchError {
    PermissionDenied,
    Unavailable(String),
}

impl Display for WatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "location permission denied"),
            Self::Unavailable(message) => write!(f, "location unavailable: {message}"),
        }
    }
}

impl Error for WatchError {}

/// Callback receiving location updates.
pub type LocationCallback = Box<dyn FnMut(LatLng)>;

/// Platform capability that streams location updates.
pub trait LocationWatcher {
    fn watch(
        &self,
        options: WatchOptions,
        on_update: LocationCallback,
    ) -> Result<LocationSubscription, WatchError>;
}

/// Live watch handle; the release hook runs once, on dispose or drop.
#[must_use = "dropping the subscription stops the watch immediately"]
pub struct LocationSubscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl LocationSubscription {
    /// Wraps the platform release hook.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Releases the platform watch. Returns `false` if already released.
    pub fn dispose(&mut self) -> bool {
        match self.release.take() {
            Some(release) => {
                release();
                debug!("event=location_watch module=geo status=released");
                true
            }
            None => false,
        }
    }
}

impl Drop for LocationSubscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Tracks the latest known location for the lifetime of a map screen.
///
/// Acquire with `start` on mount; `stop` or drop on teardown.
pub struct LocationTracker {
    current: Rc<Cell<Option<LatLng>>>,
    subscription: LocationSubscription,
}

impl LocationTracker {
    /// Starts watching, seeding the current location with `initial`.
    pub fn start<W: LocationWatcher + ?Sized>(
        watcher: &W,
        options: WatchOptions,
        initial: Option<LatLng>,
    ) -> Result<Self, WatchError> {
        let current = Rc::new(Cell::new(initial));
        let sink = Rc::clone(&current);
        let subscription = watcher.watch(
            options,
            Box::new(move |position| sink.set(Some(position))),
        )?;
        info!("event=location_watch module=geo status=started");
        Ok(Self {
            current,
            subscription,
        })
    }

    pub fn current(&self) -> Option<LatLng> {
        self.current.get()
    }

    pub fn is_watching(&self) -> bool {
        self.subscription.is_active()
    }

    /// Releases the watch; later updates are ignored by the platform.
    pub fn stop(&mut self) -> bool {
        self.subscription.dispose()
    }
}

#[cfg(test)]
mod tests {
    use super::{LocationSubscription, WatchOptions};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    #[test]
    fn dispose_then_drop_releases_once() {
        let releases = Rc::new(Cell::new(0));
        let counter = Rc::clone(&releases);
        let mut subscription = LocationSubscription::new(move || counter.set(counter.get() + 1));

        assert!(subscription.is_active());
        assert!(subscription.dispose());
        assert!(!subscription.dispose());
        drop(subscription);
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn drop_alone_releases() {
        let releases = Rc::new(Cell::new(0));
        let counter = Rc::clone(&releases);
        {
            let _subscription = LocationSubscription::new(move || counter.set(counter.get() + 1));
        }
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn default_options_match_screen_settings() {
        let options = WatchOptions::default();
        assert!(options.high_accuracy);
        assert_eq!(options.time_interval, Duration::from_secs(1));
        assert_eq!(options.distance_interval_m, 2.0);
    }
}
