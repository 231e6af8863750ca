//! Crate-internal test modules.
//!
//! Property-based tests live under `property/`; scenario-level integration
//! tests live in the top-level `tests/` directory.

mod property;
