//! API route modules, one per dashboard endpoint.

pub mod audit;
pub mod heatmap;
pub mod metadata;
