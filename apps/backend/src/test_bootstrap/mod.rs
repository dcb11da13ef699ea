//! Shared init for unit tests (wired via `ctor` in `lib.rs`).

pub mod logging;
