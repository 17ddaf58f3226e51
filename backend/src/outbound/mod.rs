//! Outbound adapters fulfilling the domain's driven ports.

pub mod persistence;
