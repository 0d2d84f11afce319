//! Trait abstractions at the library's seams.

pub mod model;

pub use model::{Completion, CompletionModel};
