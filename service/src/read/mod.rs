//! Read entities definitions.

pub mod contract;
