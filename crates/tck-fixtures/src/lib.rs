//! Hermetic fixtures for conformance-runner tests: a shell-script debuggee
//! that speaks the `"ready"`/`"quit"` handshake, a scripted in-memory mirror
//! backend, and a shared buffer sink for log assertions.

pub use shell::{ScriptedConnector, ShellDebuggee};
pub use sink::BufferSink;
pub use vm::{MethodScript, MethodsScript, ScriptedType, ScriptedVm};

mod shell;
mod sink;
mod vm;
