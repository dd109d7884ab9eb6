//! # `tck-reference-type`
//!
//! Conformance checks for the reference-type queries of a JDI-like debug
//! interface, driven against a live debuggee through the
//! [`tck-harness`](tck_harness) orchestration layer.

pub use visible_methods::{VisibleMethodsCheck, DECLARING_CLASS_UNRESOLVED};

mod visible_methods;
