//! iondata lib test modules
pub mod toolkit;
