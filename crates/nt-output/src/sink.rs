//! Output sinks — "write these bytes, in order, to this destination".

use std::fs::File;
use std::io::{self, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::path::Path;

use tracing::debug;

// ── RecordSink ────────────────────────────────────────────────────────────────

/// A byte destination with explicit lifecycle.
///
/// `write` has ordinary short-write semantics; callers go through
/// [`write_fully`](Self::write_fully), which retries until the whole buffer
/// is down or a real error occurs.  A short write is never treated as
/// success.
pub trait RecordSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    fn close(&mut self) -> io::Result<()>;

    /// Write the entire buffer, retrying partial writes and interrupts.
    fn write_fully(&mut self, buf: &[u8]) -> io::Result<()> {
        let mut written = 0;
        while written < buf.len() {
            match self.write(&buf[written..]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "sink accepted no bytes",
                    ));
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

// ── FileSink ──────────────────────────────────────────────────────────────────

/// A trace file, created fresh (truncating any previous run's output).
pub struct FileSink {
    file: File,
}

impl FileSink {
    pub fn create(path: &Path) -> io::Result<FileSink> {
        let file = File::create(path)?;
        Ok(FileSink { file })
    }
}

impl RecordSink for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn close(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

// ── SocketSink ────────────────────────────────────────────────────────────────

/// A connected stream accepted from a listening TCP endpoint.
///
/// [`listen`](Self::listen) blocks until a peer connects or the bind itself
/// fails.  This is the only blocking point in the whole system, and it
/// happens at startup, before any simulation event is processed.
pub struct SocketSink {
    stream: TcpStream,
}

impl SocketSink {
    pub fn listen(port: u16) -> io::Result<SocketSink> {
        let listener = TcpListener::bind(("0.0.0.0", port))?;
        debug!(port, "waiting for trace peer to connect");
        let (stream, peer) = listener.accept()?;
        debug!(%peer, "trace peer connected");
        Ok(SocketSink { stream })
    }
}

impl RecordSink for SocketSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn close(&mut self) -> io::Result<()> {
        match self.stream.shutdown(Shutdown::Both) {
            // The peer may already be gone; closing twice is not an error.
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}
