//! Application state for the Payroll Engine API.

use std::sync::Arc;

use crate::service::PayrollService;

/// Shared application state.
///
/// Holds the payroll service, which in turn owns the store handle.
#[derive(Clone)]
pub struct AppState {
    service: Arc<PayrollService>,
}

impl AppState {
    /// Creates a new application state around the given service.
    pub fn new(service: PayrollService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns the payroll service.
    pub fn service(&self) -> &PayrollService {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone_and_send() {
        fn assert_bounds<T: Clone + Send + Sync + 'static>() {}
        assert_bounds::<AppState>();
    }
}
