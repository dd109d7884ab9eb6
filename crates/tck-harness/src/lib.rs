//! # `tck-harness`
//!
//! Debuggee process orchestration for JDI conformance checks: launching a
//! target process with piped stdio, attaching a [mirror backend](jdi_mirror)
//! to it, and synchronizing with it over the line-oriented
//! `"ready"`/`"quit"` handshake.

pub mod config;
pub mod debuggee;
pub mod log;
pub mod pipe;
pub mod verdict;

pub use self::{
    config::RunnerConfig,
    debuggee::{Binder, Connector, Debuggee, LaunchSpec, ProcessBinder},
    log::TestLog,
    pipe::IoPipe,
    verdict::Verdict,
};
