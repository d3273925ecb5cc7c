//! Outbound adapters: implementations of driven ports.

pub mod persistence;
