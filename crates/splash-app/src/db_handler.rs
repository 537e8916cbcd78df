use salvo::async_trait;
use std::sync::Arc;

use crate::config::get_policy_from_depot;
use crate::error::AppResult;
use splash_core::error::CoreError;
use splash_service::booking::{BookingStore, ReservationGate};
use splash_service::clock::Clock;
use splash_service::session::SessionCatalog;

pub type SharedStore = Arc<dyn BookingStore>;
pub type SharedClock = Arc<dyn Clock>;

/// Injects the booking store and the clock into every request's depot.
pub struct StoreHandler {
    pub store: SharedStore,
    pub clock: SharedClock,
}

#[async_trait]
impl salvo::Handler for StoreHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.store));
        depot.inject(Arc::clone(&self.clock));
    }
}

/// ## Summary
/// Retrieves the booking store from the depot.
///
/// ## Errors
/// Returns an error if the store is not found in the depot.
pub fn get_store_from_depot(depot: &salvo::Depot) -> AppResult<SharedStore> {
    depot
        .obtain::<SharedStore>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Booking store not found in depot").into())
}

/// ## Summary
/// Retrieves the clock from the depot.
///
/// ## Errors
/// Returns an error if the clock is not found in the depot.
pub fn get_clock_from_depot(depot: &salvo::Depot) -> AppResult<SharedClock> {
    depot
        .obtain::<SharedClock>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Clock not found in depot").into())
}

/// ## Summary
/// Builds the session catalog over the depot's store and clock.
///
/// ## Errors
/// Returns an error if the store, clock, or configuration is missing.
pub fn get_catalog_from_depot(
    depot: &salvo::Depot,
) -> AppResult<SessionCatalog<SharedStore, SharedClock>> {
    Ok(SessionCatalog::new(
        get_store_from_depot(depot)?,
        get_clock_from_depot(depot)?,
        get_policy_from_depot(depot)?,
    ))
}

/// ## Summary
/// Builds the reservation gate over the depot's store and clock.
///
/// ## Errors
/// Returns an error if the store, clock, or configuration is missing.
pub fn get_gate_from_depot(
    depot: &salvo::Depot,
) -> AppResult<ReservationGate<SharedStore, SharedClock>> {
    Ok(ReservationGate::new(
        get_store_from_depot(depot)?,
        get_clock_from_depot(depot)?,
        get_policy_from_depot(depot)?,
    ))
}
