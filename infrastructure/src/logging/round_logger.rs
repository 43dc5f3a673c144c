//! JSONL file writer for round events.
//!
//! Every line is one JSON object: the event payload with `type`,
//! `timestamp`, `round` and `seq` stamped on top. `round` counts
//! `round_started` events seen by this logger (0 before the first one) and
//! `seq` numbers the events inside that round from 0, so a reader can
//! regroup the lines of one round even when several runs share a file.

use braintrust_application::ports::round_logger::{RoundEvent, RoundLogger};
use serde_json::{Map, Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

const ROUND_STARTED: &str = "round_started";

/// Writer plus the position of the next record
struct LogState {
    writer: BufWriter<File>,
    round: u64,
    seq: u64,
}

impl LogState {
    /// Advance the counters for `event_type` and return `(round, seq)`.
    fn next_position(&mut self, event_type: &str) -> (u64, u64) {
        if event_type == ROUND_STARTED {
            self.round += 1;
            self.seq = 0;
        }
        let position = (self.round, self.seq);
        self.seq += 1;
        position
    }
}

/// Appends round events to a JSONL file, one object per line.
pub struct JsonlRoundLogger {
    state: Mutex<LogState>,
    path: PathBuf,
}

impl JsonlRoundLogger {
    /// Open (or create) the log at `path`, creating parent directories.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!("Could not create round log directory {}: {}", parent.display(), e);
            return None;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .inspect_err(|e| warn!("Could not open round log file {}: {}", path.display(), e))
            .ok()?;

        Some(Self {
            state: Mutex::new(LogState {
                writer: BufWriter::new(file),
                round: 0,
                seq: 0,
            }),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Build the record for one event. Object payloads are flattened into the
/// record; anything else goes under `data`.
fn record(event: RoundEvent, round: u64, seq: u64, timestamp: String) -> Value {
    let mut map = match event.payload {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    map.insert("type".to_string(), json!(event.event_type));
    map.insert("timestamp".to_string(), json!(timestamp));
    map.insert("round".to_string(), json!(round));
    map.insert("seq".to_string(), json!(seq));
    Value::Object(map)
}

impl RoundLogger for JsonlRoundLogger {
    fn log(&self, event: RoundEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let Ok(mut state) = self.state.lock() else {
            return;
        };
        let (round, seq) = state.next_position(event.event_type);

        let Ok(line) = serde_json::to_string(&record(event, round, seq, timestamp)) else {
            return;
        };
        if let Err(e) = writeln!(state.writer, "{}", line).and_then(|_| state.writer.flush()) {
            warn!("Could not write round log {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlRoundLogger {
    fn drop(&mut self) {
        if let Ok(state) = self.state.get_mut() {
            let _ = state.writer.flush();
        }
    }
}
