//! # SDK Integrations
//!
//! Thin instantiations of the generic registration protocol, one per
//! wrapped SDK. Each submodule contributes a client type, its options, a
//! [`ClientFactory`](client_registrar::ClientFactory) implementation, and
//! a typed accessor extension on
//! [`AppContext`](client_registrar::AppContext).

pub mod analytics;
pub mod payments;

pub use analytics::{
    AnalyticsClient, AnalyticsError, AnalyticsExt, AnalyticsOptions, AnalyticsRegistration,
};
pub use payments::{
    PaymentsClient, PaymentsError, PaymentsExt, PaymentsOptions, PaymentsRegistration,
};
