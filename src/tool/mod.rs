// ABOUTME: Tool module - specifications, validation, results and the registry.
// ABOUTME: Core abstraction between the agent loop and external capabilities.

mod registry;
mod result;
mod spec;
mod traits;
mod validate;

pub use registry::*;
pub use result::*;
pub use spec::*;
pub use traits::*;
pub use validate::*;

#[cfg(test)]
mod registry_test;
