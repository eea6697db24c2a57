//! Library crate for port-probe-rs: a bounded-concurrency TCP connect scanner.
pub mod discovery;
pub mod ports;
pub mod probe;
pub mod report;
pub mod scanner;
pub mod types;
