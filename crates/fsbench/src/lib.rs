//! fsbench - latency harness for async filesystem operations.
//!
//! Measures write, read, and stat latency through an async filesystem surface,
//! serially and in concurrent batches, across payload sizes from 1KB to 4MB,
//! plus a small JSON config-loading scenario. The numbers are meant to be
//! compared between two builds (or two backends) on the same machine, not read
//! as absolute figures.

pub mod bench;
pub mod cli;
pub mod config;
pub mod fs;
pub mod platform;
pub mod results;
pub mod workspace;
