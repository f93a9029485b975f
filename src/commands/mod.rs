//! Agent entry points: load the argument record, reconcile, print the result

pub mod package;
pub mod service;
