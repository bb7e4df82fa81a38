pub use crate::galaxy::{GalaxyConfig, GalaxyStats};
pub use galaxy_points::GalaxyParameters;
