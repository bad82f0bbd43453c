pub mod catalog;
pub mod classify;
pub mod engine;
pub mod model;
pub mod reports;
pub mod util;

pub use catalog::{ElectionCatalog, ElectionConfig};
pub use engine::{FeatureStyle, StyleEngine};
pub use model::{DisplayMode, ElectionContext, ElectionLevel, ListType, ViewState};
