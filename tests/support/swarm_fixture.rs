//! Shared fixture for swarm behavioural tests.
//!
//! Wraps a headless swarm app stepping a fixed duration per tick, plus the
//! queries the suites assert against.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use bevy::prelude::*;
use buzz::{Bee, BeeBounds, DisplaySize, SwarmSettings, ViewportBounds};

use crate::thread_safe_app::{lock_app, SharedApp, ThreadSafeApp};

/// Frame step used unless a suite asks for another.
pub const DEFAULT_STEP: Duration = Duration::from_millis(100);

/// Square display, so the viewport is as tall as it is wide.
pub const SQUARE_DISPLAY: DisplaySize = DisplaySize::new(1000.0, 1000.0);

/// A headless swarm app shared across rspec closures.
#[derive(Debug, Clone)]
pub struct SwarmFixture {
    app: SharedApp,
}

impl SwarmFixture {
    /// Builds a seeded swarm on a square display.
    pub fn seeded(settings: SwarmSettings, step: Duration) -> Self {
        Self::with_display(settings, SQUARE_DISPLAY, step)
    }

    /// Builds a swarm on `display`.
    pub fn with_display(settings: SwarmSettings, display: DisplaySize, step: Duration) -> Self {
        let app = test_utils::swarm_app(settings, display, step);
        Self {
            app: Arc::new(Mutex::new(ThreadSafeApp(app))),
        }
    }

    /// Locks the underlying `App` for direct inspection or mutation.
    pub fn app_guard(&self) -> MutexGuard<'_, ThreadSafeApp> {
        lock_app(&self.app)
    }

    /// Advances the application by `frames` updates.
    pub fn tick(&self, frames: usize) {
        let mut app = self.app_guard();
        for _ in 0..frames {
            app.update();
        }
    }

    /// Number of live bees.
    pub fn bee_count(&self) -> usize {
        test_utils::bee_count(self.app_guard().world_mut())
    }

    /// Snapshot of every live bee.
    pub fn bees(&self) -> Vec<(Entity, Bee, Transform, BeeBounds)> {
        test_utils::bees(self.app_guard().world_mut())
    }

    /// Current viewport.
    pub fn viewport(&self) -> ViewportBounds {
        *self.app_guard().world().resource::<ViewportBounds>()
    }

    /// Reports a new window size.
    pub fn resize(&self, display: DisplaySize) {
        self.app_guard().insert_resource(display);
    }
}
