//! Pure utility functions.

pub mod bootstrap;
