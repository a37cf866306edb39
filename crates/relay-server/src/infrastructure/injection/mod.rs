//! Injection gateway adapters.
//!
//! - [`ydotool`] drives the real host through the `ydotool` client.
//! - [`mock`] records primitives for tests.

pub mod mock;
pub mod ydotool;

pub use mock::MockInjectionGateway;
pub use ydotool::YdotoolGateway;
