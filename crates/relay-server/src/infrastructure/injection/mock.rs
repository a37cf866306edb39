//! Mock injection gateway for unit and integration tests.
//!
//! The real gateway launches `ydotool`, which needs a running `ydotoold`
//! and actually moves the cursor on the test machine.  The mock records every
//! primitive it is asked to inject so tests can assert on exact ordering.
//!
//! # Usage in tests
//!
//! ```ignore
//! let gateway = Arc::new(MockInjectionGateway::new());
//! let dispatcher = Dispatcher::with_host(gateway.clone(), HostPlatform::Posix);
//!
//! dispatcher.dispatch(r#"{"command":"press","args":{"key":"a"}}"#).await;
//!
//! assert_eq!(gateway.recorded().len(), 2);
//! ```
//!
//! # Failure injection
//!
//! [`MockInjectionGateway::failing`] fails every call;
//! [`MockInjectionGateway::failing_at`] succeeds until the given call index
//! and fails there, which exercises fail-fast handling mid-sequence.

use std::sync::Mutex;

use async_trait::async_trait;
use relay_core::{InjectionError, Primitive};

use crate::application::injection::InjectionGateway;

/// A gateway that records primitives instead of injecting them.
#[derive(Default)]
pub struct MockInjectionGateway {
    /// Every primitive that was accepted, in call order.
    pub injected: Mutex<Vec<Primitive>>,
    /// Zero-based call index at which to fail; `Some(0)` fails every call.
    fail_at: Option<usize>,
    calls: Mutex<usize>,
}

impl MockInjectionGateway {
    /// Creates a gateway that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway whose every call fails.
    pub fn failing() -> Self {
        Self::failing_at(0)
    }

    /// Creates a gateway that fails on call number `index` (zero-based) and
    /// on every call after it.
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }

    /// Returns a copy of the recorded primitives.
    pub fn recorded(&self) -> Vec<Primitive> {
        self.injected.lock().unwrap().clone()
    }
}

#[async_trait]
impl InjectionGateway for MockInjectionGateway {
    async fn inject(&self, primitive: &Primitive) -> Result<(), InjectionError> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            let call = *calls;
            *calls += 1;
            call
        };
        if self.fail_at.is_some_and(|at| call >= at) {
            return Err(InjectionError::Platform("mock failure".into()));
        }
        self.injected.lock().unwrap().push(primitive.clone());
        Ok(())
    }
}
