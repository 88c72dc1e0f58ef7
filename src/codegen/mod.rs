//! Concrete [EmissionSink](crate::generator::EmissionSink) implementations.
//! Currently just the one target this crate actually renders: Rust.
pub mod rust_sink;

pub use rust_sink::RustSink;
