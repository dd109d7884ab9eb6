//! The line-oriented handshake channel between the runner and the debuggee.

use std::io;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{ChildStdin, ChildStdout};
use tracing::trace;

/// The tokens exchanged over the handshake channel, as whole lines.
pub mod signals {
    /// Sent once by the debuggee when it has finished its setup.
    pub const READY: &str = "ready";
    /// Sent once by the runner to tell the debuggee to exit.
    pub const QUIT: &str = "quit";
}

/// A bidirectional line-oriented pipe over a debuggee's stdio.
///
/// Both directions are blocking: [`read_line`](IoPipe::read_line) suspends
/// until the debuggee writes a full line, and the debuggee is expected to
/// suspend the same way on its `"quit"` read. No timeout is applied here;
/// callers must treat end-of-stream as a failure.
#[derive(Debug)]
pub struct IoPipe {
    reader: BufReader<ChildStdout>,
    writer: ChildStdin,
}

impl IoPipe {
    /// Creates a pipe over a captured debuggee stdout/stdin pair.
    pub fn new(stdout: ChildStdout, stdin: ChildStdin) -> Self {
        Self {
            reader: BufReader::new(stdout),
            writer: stdin,
        }
    }

    /// Reads the next line from the debuggee, without its line terminator.
    ///
    /// Returns `None` at end-of-stream.
    pub async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buffer = String::new();
        let read = self.reader.read_line(&mut buffer).await?;
        if read == 0 {
            trace!("debuggee pipe reached end-of-stream");
            return Ok(None);
        }
        while buffer.ends_with('\n') || buffer.ends_with('\r') {
            buffer.pop();
        }
        trace!("debuggee -> runner: {buffer:?}");
        Ok(Some(buffer))
    }

    /// Writes a single line to the debuggee and flushes it.
    pub async fn write_line(&mut self, line: &str) -> io::Result<()> {
        trace!("runner -> debuggee: {line:?}");
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Stdio;
    use tokio::process::Command;

    fn shell(script: &str) -> (tokio::process::Child, IoPipe) {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .expect("could not spawn sh");
        let stdout = child.stdout.take().expect("no stdout");
        let stdin = child.stdin.take().expect("no stdin");
        let pipe = IoPipe::new(stdout, stdin);
        (child, pipe)
    }

    #[test_log::test(tokio::test)]
    async fn round_trip_over_child_stdio() {
        let (mut child, mut pipe) = shell("read -r line; echo \"pong-$line\"");
        pipe.write_line("ping").await.expect("write failed");
        let reply = pipe.read_line().await.expect("read failed");
        assert_eq!(reply.as_deref(), Some("pong-ping"));
        child.wait().await.expect("wait failed");
    }

    #[test_log::test(tokio::test)]
    async fn end_of_stream_yields_none() {
        let (mut child, mut pipe) = shell("true");
        child.wait().await.expect("wait failed");
        let line = pipe.read_line().await.expect("read failed");
        assert_eq!(line, None);
    }
}
