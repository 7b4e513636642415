//! Concrete collaborators: simulated processors and failure reporters.

pub mod reporting;
pub mod simulated;
