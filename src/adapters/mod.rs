//! Adapters - concrete implementations of the ports.

pub mod ai;
pub mod email;
pub mod http;
pub mod index;
pub mod memory;
pub mod postgres;
pub mod search;
pub mod storage;
pub mod verification;
