//! A shared in-memory sink for asserting on conformance-log output.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// A cloneable [`Write`] sink backed by a shared buffer.
///
/// Hand one clone to a [`TestLog`](tck_harness::TestLog) and keep another to
/// inspect what the runner logged.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl BufferSink {
    /// The logged output so far, as UTF-8 text.
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// The logged output so far, split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl Write for BufferSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self.buffer.lock().expect("log buffer poisoned");
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
