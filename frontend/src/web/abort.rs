//! Cancellation scoped to a component's lifetime.

use web_sys::{AbortController, AbortSignal};

/// Owns an [`AbortController`]. Dropping the guard aborts every request
/// that was handed its signal, so a disposed component cannot receive a
/// late response.
pub struct AbortGuard {
    controller: AbortController,
}

impl AbortGuard {
    pub fn new() -> Self {
        let controller = AbortController::new()
            .expect("AbortController unavailable. A browser runtime is required.");
        Self { controller }
    }

    pub fn signal(&self) -> AbortSignal {
        self.controller.signal()
    }
}

impl Default for AbortGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AbortGuard {
    fn drop(&mut self) {
        self.controller.abort();
    }
}
