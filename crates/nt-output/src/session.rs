//! The `OutputSession` — sink lifecycle, event counting, and rotation.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{OutputError, OutputResult};
use crate::event::TraceEvent;
use crate::format::{FormatKind, TraceFormat};
use crate::sink::{FileSink, RecordSink, SocketSink};

/// Where the trace goes.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputTarget {
    /// A trace file, rotated to `<name>-1`, `<name>-2`, … every
    /// `max_events_per_file` events.
    File {
        path: PathBuf,
        max_events_per_file: u64,
    },

    /// A listening TCP endpoint; the run blocks at open until a peer
    /// connects.  A connected peer is a single unbounded stream, so the
    /// rotation ceiling does not apply.
    Socket { port: u16 },
}

/// Callback observing every string handed to the sink.
pub type WriteTap = Box<dyn FnMut(&str)>;

/// One run's output: the active sink, the rotation state, and the sticky
/// failure flag.
///
/// A write error flips the session into a permanent no-op — every later
/// `write_event` returns without touching the sink — because a recording
/// failure must degrade silently rather than disturb the simulation.  The
/// first error is kept for [`take_error`](Self::take_error).
pub struct OutputSession {
    sink: Box<dyn RecordSink>,
    format: Box<dyn TraceFormat>,
    target: OutputTarget,
    file_seq: u32,
    events_in_file: u64,
    events_total: u64,
    failed: bool,
    closed: bool,
    first_error: Option<OutputError>,
    tap: Option<WriteTap>,
}

impl OutputSession {
    /// Open the first sink and write the preamble.
    ///
    /// # Errors
    ///
    /// Propagates file-creation or bind/accept failures — the caller
    /// decides whether the run continues without recording.
    pub fn open(target: OutputTarget, format: FormatKind) -> OutputResult<OutputSession> {
        let format = format.create();
        let mut sink = open_sink(&target, 0)?;
        let preamble = format.preamble();
        if !preamble.is_empty() {
            sink.write_fully(preamble.as_bytes())?;
        }
        Ok(OutputSession {
            sink,
            format,
            target,
            file_seq: 0,
            events_in_file: 0,
            events_total: 0,
            failed: false,
            closed: false,
            first_error: None,
            tap: None,
        })
    }

    /// Install a callback that sees every serialized string after it was
    /// successfully written.
    pub fn set_tap(&mut self, tap: WriteTap) {
        self.tap = Some(tap);
    }

    pub fn clear_tap(&mut self) {
        self.tap = None;
    }

    /// Serialize and write one event.
    ///
    /// Silently does nothing once the session is failed or closed.  Write
    /// errors are absorbed here: the failure flag goes up, one warning is
    /// logged, and the error is stored for [`take_error`](Self::take_error).
    pub fn write_event(&mut self, event: &TraceEvent) {
        if self.failed || self.closed {
            return;
        }
        let text = self.format.render(event);
        if text.is_empty() {
            // Some events have no representation in this format.
            return;
        }
        if let Err(e) = self.sink.write_fully(text.as_bytes()) {
            self.fail(e.into());
            return;
        }
        self.events_in_file += 1;
        self.events_total += 1;
        if let Some(tap) = self.tap.as_mut() {
            tap(&text);
        }
        self.advance_file_if_needed();
    }

    /// Write the epilogue and close the sink.  Idempotent.
    pub fn close(&mut self) -> OutputResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if self.failed {
            return Ok(());
        }
        let epilogue = self.format.epilogue();
        if !epilogue.is_empty() {
            self.sink.write_fully(epilogue.as_bytes())?;
        }
        self.sink.close()?;
        Ok(())
    }

    /// `true` once a write error has permanently disabled the session.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Take the first stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.first_error.take()
    }

    /// Events written across all files this run.
    pub fn events_total(&self) -> u64 {
        self.events_total
    }

    /// Events written to the currently open file.
    pub fn events_in_file(&self) -> u64 {
        self.events_in_file
    }

    /// Zero for the original file, then 1, 2, … after each rotation.
    pub fn file_seq(&self) -> u32 {
        self.file_seq
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn fail(&mut self, error: OutputError) {
        warn!(%error, "trace sink failed; recording disabled for the rest of the run");
        if self.first_error.is_none() {
            self.first_error = Some(error);
        }
        self.failed = true;
    }

    /// Rotate once the current file has held its share of events.
    ///
    /// Only file targets rotate.  The per-file counter resets; everything
    /// keyed by packet identity is untouched, so correlation spans files.
    fn advance_file_if_needed(&mut self) {
        let OutputTarget::File {
            max_events_per_file,
            ..
        } = self.target
        else {
            return;
        };
        if self.events_in_file < max_events_per_file {
            return;
        }
        if let Err(e) = self.rotate() {
            self.fail(e);
        }
    }

    fn rotate(&mut self) -> OutputResult<()> {
        let epilogue = self.format.epilogue();
        if !epilogue.is_empty() {
            self.sink.write_fully(epilogue.as_bytes())?;
        }
        self.sink.close()?;

        self.file_seq += 1;
        self.sink = open_sink(&self.target, self.file_seq)?;
        self.events_in_file = 0;
        let preamble = self.format.preamble();
        if !preamble.is_empty() {
            self.sink.write_fully(preamble.as_bytes())?;
        }
        debug!(seq = self.file_seq, "rotated trace output to next file");
        Ok(())
    }
}

/// Open the sink for `target`; `seq` selects the rotated file name.
fn open_sink(target: &OutputTarget, seq: u32) -> OutputResult<Box<dyn RecordSink>> {
    match target {
        OutputTarget::File { path, .. } => {
            let path = rotated_path(path, seq);
            Ok(Box::new(FileSink::create(&path)?))
        }
        OutputTarget::Socket { port } => Ok(Box::new(SocketSink::listen(*port)?)),
    }
}

/// `trace.xml` stays `trace.xml` for the first file, then `trace.xml-1`,
/// `trace.xml-2`, … — the sequence number is appended to the full name so
/// the family sorts together.
fn rotated_path(base: &Path, seq: u32) -> PathBuf {
    if seq == 0 {
        return base.to_path_buf();
    }
    let mut name = base.as_os_str().to_os_string();
    name.push(format!("-{seq}"));
    PathBuf::from(name)
}
