//! A shell-script debuggee speaking the handshake protocol.

use crate::ScriptedVm;
use std::io;
use tck_harness::debuggee::{Connector, LaunchSpec, ProcessBinder};
use tck_harness::pipe::signals;
use tck_harness::verdict::STATUS_BASE;
use tokio::process::Child;

/// Builds [`LaunchSpec`]s for an `sh` debuggee that takes part in the
/// `"ready"`/`"quit"` handshake.
///
/// The default debuggee announces `ready`, blocks until it is told to quit
/// (or its stdin closes), and exits with the expected success status 95.
#[derive(Debug, Clone)]
pub struct ShellDebuggee {
    ready_token: Option<String>,
    await_quit: bool,
    exit_status: i32,
}

impl Default for ShellDebuggee {
    fn default() -> Self {
        Self {
            ready_token: Some(signals::READY.to_owned()),
            await_quit: true,
            exit_status: STATUS_BASE,
        }
    }
}

impl ShellDebuggee {
    /// Replaces the announced ready token.
    pub fn ready_token(mut self, token: impl Into<String>) -> Self {
        self.ready_token = Some(token.into());
        self
    }

    /// A debuggee that exits immediately without announcing anything, so
    /// the runner sees end-of-stream instead of a handshake line.
    pub fn silent() -> Self {
        Self {
            ready_token: None,
            await_quit: false,
            exit_status: STATUS_BASE,
        }
    }

    /// The debuggee announces its ready token but exits without awaiting
    /// the quit signal, so the runner's `"quit"` write can land on a
    /// closed pipe.
    pub fn no_quit_wait(mut self) -> Self {
        self.await_quit = false;
        self
    }

    /// Replaces the exit status the debuggee terminates with.
    pub fn exit_status(mut self, status: i32) -> Self {
        self.exit_status = status;
        self
    }

    /// Renders the debuggee as a launch spec.
    pub fn launch_spec(&self) -> LaunchSpec {
        let mut script = String::new();
        if let Some(token) = &self.ready_token {
            script.push_str(&format!("echo {token}\n"));
        }
        if self.await_quit {
            script.push_str("read -r _signal\n");
        }
        script.push_str(&format!("exit {}\n", self.exit_status));
        LaunchSpec::new("sh").arg("-c").arg(script)
    }

    /// Pairs this debuggee with a scripted backend as a ready-to-use binder.
    pub fn binder(&self, vm: ScriptedVm) -> ProcessBinder<ScriptedConnector> {
        ProcessBinder::new(self.launch_spec(), ScriptedConnector::new(vm))
    }
}

/// A [`Connector`] that hands out a clone of a pre-built [`ScriptedVm`].
#[derive(Debug)]
pub struct ScriptedConnector {
    vm: ScriptedVm,
}

impl ScriptedConnector {
    /// Creates a connector for the given scripted VM.
    pub fn new(vm: ScriptedVm) -> Self {
        Self { vm }
    }
}

impl Connector for ScriptedConnector {
    type Vm = ScriptedVm;

    fn name(&self) -> &str {
        "scripted"
    }

    async fn attach(&self, _child: &Child) -> io::Result<ScriptedVm> {
        Ok(self.vm.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tck_harness::debuggee::Binder;

    #[test]
    fn default_script_handshakes_and_exits_with_95() {
        let spec = ShellDebuggee::default().launch_spec();
        let rendered = format!("{spec:?}");
        assert!(rendered.contains("echo ready"));
        assert!(rendered.contains("read -r _signal"));
        assert!(rendered.contains("exit 95"));
    }

    #[test_log::test(tokio::test)]
    async fn debuggee_announces_ready_and_obeys_quit() {
        let vm = ScriptedVm::default();
        let binder = ShellDebuggee::default().binder(vm);
        let mut debuggee = binder.bind().await.expect("bind failed");

        let line = debuggee.pipe_mut().read_line().await.expect("read failed");
        assert_eq!(line.as_deref(), Some(signals::READY));

        debuggee
            .pipe_mut()
            .write_line(signals::QUIT)
            .await
            .expect("write failed");
        let status = debuggee.wait_for().await.expect("wait failed");
        assert_eq!(status.code(), Some(95));
    }

    #[test]
    fn no_quit_wait_script_keeps_ready_but_drops_the_read() {
        let spec = ShellDebuggee::default().no_quit_wait().launch_spec();
        let rendered = format!("{spec:?}");
        assert!(rendered.contains("echo ready"));
        assert!(!rendered.contains("read -r"));
        assert!(rendered.contains("exit 95"));
    }

    #[test_log::test(tokio::test)]
    async fn silent_debuggee_closes_the_pipe() {
        let vm = ScriptedVm::default();
        let binder = ShellDebuggee::silent().binder(vm);
        let mut debuggee = binder.bind().await.expect("bind failed");
        let line = debuggee.pipe_mut().read_line().await.expect("read failed");
        assert_eq!(line, None);
    }
}
