//! Grid sizing and array allocation

pub mod factory;
pub mod sizer;

// Re-export main types
pub use factory::{ArrayFactory, QuantityFactory};
pub use sizer::{GridConfig, GridExtent};
