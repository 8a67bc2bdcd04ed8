//! The recorder's configuration surface.

use std::path::PathBuf;

use nt_core::{SimTime, TimeWindow};
use nt_output::{FormatKind, OutputTarget};

use crate::error::{RecorderError, RecorderResult};

/// Events per file before rotating to the next one.
pub const DEFAULT_MAX_EVENTS_PER_FILE: u64 = 100_000;

/// How often the position poll fires.  Lower values catch fast movers at
/// the cost of many more position events.
pub const DEFAULT_POLL_INTERVAL: SimTime = SimTime(250_000_000); // 250 ms

/// Pending records older than this are evicted at the next poll tick.
pub const DEFAULT_PURGE_MAX_AGE: SimTime = SimTime(5_000_000_000); // 5 s

/// Everything a run's recording behavior depends on.
///
/// Typically built with [`for_file`](Self::for_file) or
/// [`for_port`](Self::for_port) and adjusted field-by-field.  Validation
/// happens once, in [`Recorder::new`][crate::Recorder::new] — a malformed
/// configuration aborts setup with a descriptive cause and is not
/// recoverable mid-run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecorderConfig {
    /// Where the trace goes: a rotating file family or a listening port.
    pub target: OutputTarget,

    /// Structured XML or flat legacy lines.
    pub format: FormatKind,

    /// Only events with `start <= t <= stop` are serialized.  Tables update
    /// regardless.
    pub window: TimeWindow,

    /// Interval between position-poll ticks (the engine schedules these).
    pub poll_interval: SimTime,

    /// Age bound for pending transmit records; enforced at every poll tick.
    pub purge_max_age: SimTime,

    /// Give nodes without mobility state a deterministic pseudo-random
    /// position (once) instead of omitting them from position output.
    pub synthesize_positions: bool,

    /// Attach decoded packet headers to transmit events.
    pub capture_metadata: bool,

    /// Record chatty link-layer control frames too.  Off by default: only
    /// data frames are traced.
    pub show_control_frames: bool,

    /// Seed for position synthesis.
    pub seed: u64,
}

impl RecorderConfig {
    /// A file-backed configuration with all defaults.
    pub fn for_file(path: impl Into<PathBuf>) -> RecorderConfig {
        RecorderConfig {
            target: OutputTarget::File {
                path: path.into(),
                max_events_per_file: DEFAULT_MAX_EVENTS_PER_FILE,
            },
            format: FormatKind::Xml,
            window: TimeWindow::ALL,
            poll_interval: DEFAULT_POLL_INTERVAL,
            purge_max_age: DEFAULT_PURGE_MAX_AGE,
            synthesize_positions: true,
            capture_metadata: false,
            show_control_frames: false,
            seed: 1,
        }
    }

    /// A socket-backed configuration with all defaults.  The run will block
    /// at start until a peer connects to `port`.
    pub fn for_port(port: u16) -> RecorderConfig {
        RecorderConfig {
            target: OutputTarget::Socket { port },
            ..RecorderConfig::for_file("")
        }
    }

    /// Reject malformed configurations before the run starts.
    pub fn validate(&self) -> RecorderResult<()> {
        if !self.window.is_ordered() {
            return Err(RecorderError::Config(format!(
                "capture stop time {} precedes start time {}",
                self.window.stop, self.window.start
            )));
        }
        if let OutputTarget::File {
            max_events_per_file: 0,
            ..
        } = self.target
        {
            return Err(RecorderError::Config(
                "rotation ceiling must be at least one event per file".to_owned(),
            ));
        }
        if self.poll_interval == SimTime::ZERO {
            return Err(RecorderError::Config(
                "position poll interval must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}
