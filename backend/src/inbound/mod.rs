//! Inbound adapters calling into the domain.

pub mod http;
pub mod rpc;
