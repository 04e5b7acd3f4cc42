//! Core types and utilities

pub mod dims;
pub mod units;

pub use dims::Dim;
pub use units::Units;
