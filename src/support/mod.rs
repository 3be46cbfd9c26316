//! Collaborators used around beans: null-safe comparison and test bootstrap.

pub mod compare;
pub mod testing;
