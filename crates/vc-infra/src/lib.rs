//! # vc-infra
//!
//! Infrastructure implementations of the `vc-core` ports that do not talk
//! to the operating system directly.

pub mod security;
pub mod time;

pub use security::{DefaultKeyCustodian, InMemorySecureStorage, MASTER_KEY_ID};
pub use time::SystemClock;
