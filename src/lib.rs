#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate providing the Buzz bee swarm.
//!
//! Bees fly in from outside the visible area, wander with a slow tumbling
//! drift and are removed once they leave it. The simulation is headless and
//! always compiled; the `render` feature adds the camera, window plumbing and
//! glTF models.
pub mod bee;
pub mod bounds;
pub mod constants;
pub mod factory;
pub mod flight;
pub mod logging;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod models;
pub mod plugin;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod presentation;
pub mod settings;
pub mod spawner;
pub mod viewport;
pub use constants::*;

// Re-export commonly used items
pub use bee::{Bee, BeeAnimation, BeeBounds, BeeRng, BeeTemplates, FlightPhase, Glasses};
pub use bounds::BoundingBox;
pub use logging::init as init_logging;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use models::{BeeModelPaths, BeeModelsPlugin, ModelLoadError};
pub use plugin::{SwarmPlugin, SwarmSet};
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use presentation::PresentationPlugin;
pub use settings::SwarmSettings;
pub use spawner::BeeSpawnTimer;
pub use viewport::{DisplaySize, ViewportBounds};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use buzz::prelude::*;
    //! ```

    pub use crate::bee::{Bee, BeeTemplates, FlightPhase};
    pub use crate::bounds::BoundingBox;
    pub use crate::plugin::{SwarmPlugin, SwarmSet};
    pub use crate::settings::SwarmSettings;
    pub use crate::viewport::{DisplaySize, ViewportBounds};
}
