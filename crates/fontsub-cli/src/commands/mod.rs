//! Command implementations

pub mod subset;
