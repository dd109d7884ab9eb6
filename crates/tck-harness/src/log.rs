//! The diagnostic log a conformance run writes its verdict evidence to.

use std::io::Write;
use tracing::{debug, warn};

/// A conformance-run log over an explicit output sink.
///
/// Failure diagnostics ([`complain`](TestLog::complain)) and progress
/// headers ([`println`](TestLog::println)) are always written; per-step
/// narration ([`display`](TestLog::display)) only when verbose. Write
/// failures are swallowed; diagnostic logging is never itself fatal.
pub struct TestLog {
    sink: Box<dyn Write + Send>,
    verbose: bool,
}

impl TestLog {
    /// Creates a log writing to the given sink.
    pub fn new(sink: impl Write + Send + 'static, verbose: bool) -> Self {
        Self {
            sink: Box::new(sink),
            verbose,
        }
    }

    /// Creates a log writing to the process stdout.
    pub fn stdout(verbose: bool) -> Self {
        Self::new(std::io::stdout(), verbose)
    }

    /// Writes an unconditional progress line.
    pub fn println(&mut self, message: impl AsRef<str>) {
        let _ = writeln!(self.sink, "{}", message.as_ref());
    }

    /// Writes a progress line, only in verbose mode.
    pub fn display(&mut self, message: impl AsRef<str>) {
        debug!("{}", message.as_ref());
        if self.verbose {
            let _ = writeln!(self.sink, "--> {}", message.as_ref());
        }
    }

    /// Writes a failure diagnostic, regardless of verbosity.
    pub fn complain(&mut self, message: impl AsRef<str>) {
        warn!("{}", message.as_ref());
        let _ = writeln!(self.sink, "##> {}", message.as_ref());
    }
}

impl std::fmt::Debug for TestLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestLog")
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Sink {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn display_is_gated_on_verbose() {
        let sink = Sink::default();
        let mut log = TestLog::new(sink.clone(), false);
        log.display("launched");
        log.complain("no ready signal");
        log.println("check finished");

        let contents = sink.contents();
        assert!(!contents.contains("launched"));
        assert!(contents.contains("##> no ready signal"));
        assert!(contents.contains("check finished"));
    }

    #[test]
    fn verbose_mode_prefixes_progress_lines() {
        let sink = Sink::default();
        let mut log = TestLog::new(sink.clone(), true);
        log.display("launched");
        assert_eq!(sink.contents(), "--> launched\n");
    }
}
