//! VaultClip: an encrypted, in-memory clipboard history.
//!
//! The library half of the root crate only hosts the bootstrap: tracing,
//! configuration loading and dependency wiring. The engine itself lives in
//! the `vc-*` workspace crates.

pub mod bootstrap;
