//! Write-unbinding middleware
//!
//! Mount this after the routing adapters have been set up. It guarantees
//! the binding to the primary is reset at the end of every request, so a
//! write in one request never pins reads in the next one to the primary.
//!
//! The reset runs on every exit path: a successful response, an error
//! response, and an unwinding handler.

use axum::{body::Body, extract::Request, extract::State, middleware::Next, response::Response};
use std::sync::Arc;

/// The single idempotent interface the request lifecycle calls on every
/// adapter that exposes a binding.
pub trait BindingReset: Send + Sync {
    fn reset_binding(&self);
}

impl BindingReset for crate::adapters::RoutingAdapter {
    fn reset_binding(&self) {
        crate::adapters::RoutingAdapter::reset_binding(self);
    }
}

/// Adapters to unbind at the end of each request.
///
/// Cheaply cloneable; hand it to
/// `axum::middleware::from_fn_with_state(state, reset_after_request)`.
#[derive(Clone, Default)]
pub struct UnbindState {
    adapters: Arc<Vec<Arc<dyn BindingReset>>>,
}

impl UnbindState {
    pub fn new(adapters: Vec<Arc<dyn BindingReset>>) -> Self {
        Self {
            adapters: Arc::new(adapters),
        }
    }

    pub fn single(adapter: Arc<dyn BindingReset>) -> Self {
        Self::new(vec![adapter])
    }

    fn reset_all(&self) {
        for adapter in self.adapters.iter() {
            adapter.reset_binding();
        }
        tracing::trace!(
            adapters = self.adapters.len(),
            "Reset primary bindings after request"
        );
    }
}

/// Middleware that resets adapter bindings once the request completes.
///
/// # Example
///
/// ```ignore
/// Router::new()
///     .layer(axum::middleware::from_fn_with_state(state, reset_after_request))
/// ```
pub async fn reset_after_request(
    State(state): State<UnbindState>,
    request: Request,
    next: Next,
) -> Response<Body> {
    // Dropped on return AND on unwind, so the reset always runs
    let _reset = ResetOnExit(state);
    next.run(request).await
}

struct ResetOnExit(UnbindState);

impl Drop for ResetOnExit {
    fn drop(&mut self) {
        self.0.reset_all();
    }
}
