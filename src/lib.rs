//! ParkirLens: parking-levy revenue estimation and site segmentation
//!
//! This library estimates a municipality's parking-levy revenue potential
//! from macro vehicle counts and an optional per-site table of average
//! parked-vehicle counts, and segments sites into Low/Medium/High tiers
//! using K-Means clustering.

pub mod cli;
pub mod data;
pub mod model;
pub mod potential;
pub mod viz;

// Re-export public items for easier access
pub use cli::Args;
pub use data::{load_parking_sites, SchemaError, SiteRecord};
pub use model::{segment_sites, Category, SegmentationModel};
pub use potential::{
    city_potential, neighborhood_potentials, site_potentials, CityPotential, MacroParams,
    NeighborhoodPotential, PotentialFigures, SitePotential,
};

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
