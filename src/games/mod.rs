//! Game implementations.

pub mod ladder;
