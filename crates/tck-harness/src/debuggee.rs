//! Launching debuggee processes and binding mirror backends to them.

use crate::pipe::IoPipe;
use jdi_mirror::{MirrorError, VirtualMachine};
use std::io;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tokio::process::{Child, Command};
use tracing::{debug, trace};

/// How to start a debuggee process.
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    program: String,
    args: Vec<String>,
}

impl LaunchSpec {
    /// Creates a launch spec for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec![],
        }
    }

    /// Appends an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Builds the command: all stdio captured, killed if the handle is
    /// dropped before the debuggee exits.
    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

/// Produces the mirror backend for a freshly launched debuggee.
///
/// This is the substitution seam for debug backends: anything that can hand
/// out a [`VirtualMachine`] for the child satisfies it.
pub trait Connector {
    /// The virtual machine mirror this connector attaches.
    type Vm: VirtualMachine;

    /// A short identifier for this connector, used in diagnostics.
    fn name(&self) -> &str;

    /// Attaches to the launched debuggee.
    #[expect(async_fn_in_trait)]
    async fn attach(&self, child: &Child) -> io::Result<Self::Vm>;
}

/// Binds a debuggee: launches the target process and establishes the debug
/// interface connection to it.
pub trait Binder {
    /// The virtual machine mirror bound to the debuggee.
    type Vm: VirtualMachine;

    /// Launches the debuggee and attaches to it.
    #[expect(async_fn_in_trait)]
    async fn bind(&self) -> io::Result<Debuggee<Self::Vm>>;
}

/// A [`Binder`] that spawns a local process per [`LaunchSpec`] and attaches
/// a backend through a [`Connector`].
#[derive(Debug)]
pub struct ProcessBinder<C> {
    spec: LaunchSpec,
    connector: C,
}

impl<C: Connector> ProcessBinder<C> {
    /// Creates a binder for the given launch spec and connector.
    pub fn new(spec: LaunchSpec, connector: C) -> Self {
        Self { spec, connector }
    }
}

impl<C: Connector> Binder for ProcessBinder<C> {
    type Vm = C::Vm;

    async fn bind(&self) -> io::Result<Debuggee<C::Vm>> {
        let mut child = self.spec.command().spawn()?;
        trace!(
            "launched debuggee {:?} (pid {:?})",
            self.spec.program,
            child.id()
        );

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("debuggee stdout was not captured"))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("debuggee stdin was not captured"))?;
        let pipe = IoPipe::new(stdout, stdin);

        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut lines = tokio::io::BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(target: "debuggee", "{line}");
                }
            });
        }

        trace!("attaching via {:?} connector", self.connector.name());
        let vm = self.connector.attach(&child).await?;
        Ok(Debuggee {
            child,
            pipe,
            vm: Arc::new(vm),
        })
    }
}

/// A launched debuggee: the target process, its handshake pipe, and the
/// mirror backend attached to it. Exclusively owned by the runner for the
/// duration of a check.
#[derive(Debug)]
pub struct Debuggee<Vm: VirtualMachine> {
    child: Child,
    pipe: IoPipe,
    vm: Arc<Vm>,
}

impl<Vm: VirtualMachine> Debuggee<Vm> {
    /// The handshake pipe to the debuggee.
    pub fn pipe_mut(&mut self) -> &mut IoPipe {
        &mut self.pipe
    }

    /// Resumes execution of the debuggee.
    pub async fn resume(&self) -> Result<(), MirrorError> {
        self.vm.resume().await
    }

    /// Looks up a loaded class in the debuggee by its fully qualified name.
    pub async fn class_by_name(&self, name: &str) -> Result<Option<Vm::Type>, MirrorError> {
        self.vm.class_by_name(name).await
    }

    /// Blocks until the debuggee exits, returning its exit status.
    pub async fn wait_for(&mut self) -> io::Result<ExitStatus> {
        let status = self.child.wait().await?;
        trace!("debuggee exited with {status}");
        Ok(status)
    }
}
