//! Bitget spot exchange adapter.
//!
//! Signs requests with the account's API secret and talks to the v1 spot
//! REST endpoints for market orders and account assets.

pub mod client;
pub mod protocol;
pub mod signer;

pub use client::{BitgetClient, BitgetConfig};
pub use signer::{Credentials, Signer};
