//! Bus-facing dispatch glue.
//!
//! The session library hands this layer a parsed address identifier plus
//! a typed request. The dispatcher resolves the identifier to an address
//! class, takes the context lock for the duration of the request, runs
//! the router, and performs deferred configuration persistence when a
//! controller-level set succeeded.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use airbridge_domain::{BridgeContext, SharedContext};

use crate::request::{
    AddressClass, GetPropertyRequest, GetPropertyResponse, SetPropertyRequest, SetPropertyResponse,
};
use crate::router::PropertyRouter;

/// Identifiers the three address classes answer to on the bus.
#[derive(Debug, Clone)]
pub struct BusAddresses {
    /// The controller's bus identifier.
    pub controller: String,
    /// The announced container's bus identifier.
    pub container: String,
    /// The bridged device's bus identifier.
    pub device: String,
}

impl BusAddresses {
    /// Resolve a parsed identifier case-insensitively.
    pub fn resolve(&self, identifier: &str) -> Option<AddressClass> {
        if identifier.eq_ignore_ascii_case(&self.controller) {
            Some(AddressClass::Controller)
        } else if identifier.eq_ignore_ascii_case(&self.container) {
            Some(AddressClass::Container)
        } else if identifier.eq_ignore_ascii_case(&self.device) {
            Some(AddressClass::Device)
        } else {
            None
        }
    }
}

/// Callback invoked with the locked context after a set that requires
/// persistence. Supplied by the daemon; writes the configuration file.
pub type PersistFn = Box<dyn Fn(&BridgeContext) + Send + Sync>;

/// Entry point the bus session layer drives for property requests.
pub struct BusDispatch {
    context: SharedContext,
    addresses: BusAddresses,
    router: PropertyRouter,
    persist: PersistFn,
}

impl BusDispatch {
    /// Wire the shared context and persistence callback to a router.
    pub fn new(context: SharedContext, addresses: BusAddresses, persist: PersistFn) -> Self {
        Self {
            context,
            addresses,
            router: PropertyRouter::new(),
            persist,
        }
    }

    /// Handle a get-property request. Unknown identifiers are ignored
    /// with a warning and produce no response.
    pub fn get_property(
        &self,
        identifier: &str,
        request: &GetPropertyRequest,
    ) -> GetPropertyResponse {
        let class = match self.addresses.resolve(identifier) {
            Some(class) => class,
            None => {
                warn!("get property: unhandled address {}", identifier);
                return None;
            }
        };
        let guard = self.context.lock().unwrap();
        Some(self.router.handle_get(&guard, class, request, unix_now()))
    }

    /// Handle a set-property request, persisting afterwards when the
    /// router asks for it. Unknown identifiers are ignored with a
    /// warning and produce no response.
    pub fn set_property(
        &self,
        identifier: &str,
        request: &SetPropertyRequest,
    ) -> Option<SetPropertyResponse> {
        let class = match self.addresses.resolve(identifier) {
            Some(class) => class,
            None => {
                warn!("set property: unhandled address {}", identifier);
                return None;
            }
        };
        let mut guard = self.context.lock().unwrap();
        let response = self.router.handle_set(&mut guard, class, request);
        if response.persist {
            (self.persist)(&guard);
        }
        Some(response)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
