//! The injection gateway port.
//!
//! The dispatcher depends only on this trait.  The `ydotool` adapter and the
//! recording mock live in `infrastructure::injection`.

use async_trait::async_trait;
use relay_core::{InjectionError, Primitive};

/// Executes primitive input events on the host.
///
/// Implementations must be safe to share across connection tasks; they hold
/// no per-connection state.
#[async_trait]
pub trait InjectionGateway: Send + Sync {
    /// Executes one primitive, returning once the backend has finished with
    /// it (or, for `ProcessExec`, once the process has been launched).
    async fn inject(&self, primitive: &Primitive) -> Result<(), InjectionError>;
}
