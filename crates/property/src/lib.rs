//! AirBridge property routing
//!
//! The read/write request path of the bridge: typed property requests from
//! the bus session layer are routed by address class, answered from the
//! shared context as immutable property trees, and acknowledged with
//! per-name status codes.
//!
//! - [`node`] — property tree values built bottom-up
//! - [`request`] — address classes, request shapes, status codes
//! - [`tree`] — the dynamic sensor subtrees
//! - [`router`] — the pure dispatch core
//! - [`dispatch`] — bus-facing glue owning lock discipline and deferred
//!   configuration persistence

#![warn(missing_docs)]

pub mod dispatch;
pub mod node;
pub mod request;
pub mod router;
pub mod tree;

pub use dispatch::{BusAddresses, BusDispatch, PersistFn};
pub use node::{PropertyNode, PropertyValue};
pub use request::{
    AddressClass, GetItem, GetPropertyRequest, GetPropertyResponse, PropertyStatus, SetItem,
    SetPropertyRequest, SetPropertyResponse,
};
pub use router::PropertyRouter;
