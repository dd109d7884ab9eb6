//! Checks that a class without visible methods reports an empty
//! visible-methods list.

use jdi_mirror::{Method, ReferenceType};
use std::io::{self, Write};
use tck_harness::debuggee::Binder;
use tck_harness::pipe::signals;
use tck_harness::verdict::{Verdict, STATUS_BASE, STATUS_PASSED};
use tck_harness::{RunnerConfig, TestLog};
use tracing::instrument;

/// Sentinel substituted when a method's declaring type cannot be resolved.
/// Resolution is best-effort: a secondary failure must never abort the
/// diagnostic loop.
pub const DECLARING_CLASS_UNRESOLVED: &str = "declaring class NOT defined";

/// The visible-methods conformance check: the named debuggee class must
/// report an empty visible-methods list.
///
/// One run drives a single debuggee through its whole lifecycle: launch,
/// resume, `"ready"` handshake, one reflective query, `"quit"` signal, exit.
/// Nothing is retried; every violation is logged once and folded into the
/// coarse [`Verdict`].
#[derive(Debug, Clone)]
pub struct VisibleMethodsCheck {
    class_name: String,
}

impl VisibleMethodsCheck {
    /// Creates a check against the given fully qualified debuggee class.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
        }
    }

    /// Runs the check once.
    ///
    /// Infrastructure failures (spawn, pipe IO, wait) surface as `Err`;
    /// conformance failures surface as log lines plus [`Verdict::Failed`].
    #[instrument(skip_all, fields(class = %self.class_name))]
    pub async fn run<B: Binder>(&self, binder: &B, log: &mut TestLog) -> io::Result<Verdict> {
        log.println("checking that ReferenceType::visible_methods() reports no methods");

        let mut debuggee = binder.bind().await?;
        log.display("debuggee launched");
        debuggee.resume().await?;

        let line = debuggee.pipe_mut().read_line().await?;
        if line.as_deref() != Some(signals::READY) {
            log.complain(format!(
                "unexpected debuggee signal (not \"ready\"): {line:?}"
            ));
            return Ok(Verdict::Failed);
        }
        log.display("debuggee \"ready\" signal received");

        log.println(format!(
            "checking visible methods of debuggee class {}...",
            self.class_name
        ));
        let mut class_not_found = false;
        let mut query_failed = false;
        let mut visible_count = 0;
        match debuggee.class_by_name(&self.class_name).await {
            Err(err) => {
                log.complain(format!("lookup of class {} failed: {err}", self.class_name));
                class_not_found = true;
            }
            Ok(None) => {
                log.complain(format!("could not find class: {}", self.class_name));
                class_not_found = true;
            }
            Ok(Some(class)) => match class.visible_methods().await {
                Err(err) => {
                    log.complain(format!(
                        "ReferenceType::visible_methods() raised unexpected {err}"
                    ));
                    query_failed = true;
                }
                Ok(methods) => {
                    visible_count = methods.len();
                    for method in &methods {
                        let declaring = match method.declaring_type().await {
                            Ok(declaring) => declaring.name().to_owned(),
                            Err(_) => DECLARING_CLASS_UNRESOLVED.to_owned(),
                        };
                        log.complain(format!(
                            "unexpected visible method: {}  ({declaring})",
                            method.name()
                        ));
                    }
                }
            },
        }

        let mut verdict = if class_not_found || query_failed {
            Verdict::Failed
        } else {
            Verdict::Passed
        };
        if visible_count > 0 {
            log.complain(format!(
                "unexpected visible methods number = {visible_count}"
            ));
            verdict = Verdict::Failed;
        } else {
            log.println("returned list of visible methods is empty");
        }

        // Teardown is attempted no matter what the verdict is so far.
        log.display("waiting for debuggee to finish...");
        if let Err(err) = debuggee.pipe_mut().write_line(signals::QUIT).await {
            log.complain(format!("failed to send \"quit\" signal: {err}"));
        }
        let status = debuggee.wait_for().await?;
        if status.code() == Some(STATUS_BASE + STATUS_PASSED) {
            log.display(format!("expected debuggee exit status: {status}"));
        } else {
            log.complain(format!(
                "unexpected debuggee exit status (not {}): {status}",
                STATUS_BASE + STATUS_PASSED
            ));
            verdict = Verdict::Failed;
        }

        log.println(format!("visible-methods check {verdict}"));
        Ok(verdict)
    }

    /// JCK-like entry point: parses the argument list, runs the check, and
    /// returns the offset process exit code (95 passed, 97 failed).
    pub async fn run_from_args<B: Binder>(
        &self,
        binder: &B,
        args: &[String],
        sink: impl Write + Send + 'static,
    ) -> io::Result<i32> {
        let config = RunnerConfig::from_args(args).map_err(io::Error::other)?;
        let mut log = TestLog::new(sink, config.verbose);
        let verdict = self.run(binder, &mut log).await?;
        Ok(verdict.exit_code())
    }
}
