// Library root for the league data layer: API models, configuration, the
// fetch capability and the keyed loader used by every view.

pub mod api;
pub mod config;
pub mod loader;
pub mod model;
