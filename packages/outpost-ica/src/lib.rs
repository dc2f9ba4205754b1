#![doc = include_str!("../README.md")]
#![deny(
    clippy::nursery,
    clippy::pedantic,
    warnings,
    missing_docs,
    unused_crate_dependencies
)]

pub mod ack;
pub mod error;
pub mod keys;
pub mod message;
pub mod metadata;
pub mod packet;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::CodecError;
