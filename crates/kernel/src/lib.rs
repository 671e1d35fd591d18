//! Core building blocks for the bookshelf application: layered settings,
//! the module trait, and the module registry driving the lifecycle.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
