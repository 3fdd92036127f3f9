//! Line-delimited JSON file journal.
//!
//! Layout: one event per line, newline-terminated, immutable once
//! written, no in-place updates. Appends are flushed and fsynced per
//! commit boundary (one `append_batch` call). A crash mid-write leaves
//! at most one partial final line, which recovery truncates.
//!
//! Lock discipline: a single interior mutex serializes all writers in
//! this process; the file is owned exclusively by one journal instance.
//! Cross-process sharing is not supported.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use spincycle_core::AgentId;
use spincycle_events::GameEvent;
use tracing::{debug, warn};

use crate::journal::{Journal, JournalError};

struct FileJournalInner {
    file: File,
    /// Full replica of the on-disk log; reads never touch the file.
    events: Vec<GameEvent>,
}

pub struct FileJournal {
    path: PathBuf,
    inner: Mutex<FileJournalInner>,
}

impl FileJournal {
    /// Open (or create) a journal file, recovering from a torn final
    /// line if the previous process died mid-append.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, JournalError> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| JournalError::Storage(format!("open {}: {e}", path.display())))?;

        let mut raw = String::new();
        file.read_to_string(&mut raw)
            .map_err(|e| JournalError::Storage(format!("read {}: {e}", path.display())))?;

        let (events, valid_len) = Self::recover(&raw)?;
        if valid_len < raw.len() {
            warn!(
                path = %path.display(),
                dropped_bytes = raw.len() - valid_len,
                "truncating torn final line from journal"
            );
            file.set_len(valid_len as u64)
                .map_err(|e| JournalError::Storage(format!("truncate: {e}")))?;
            file.seek(SeekFrom::End(0))
                .map_err(|e| JournalError::Storage(format!("seek: {e}")))?;
        }

        debug!(path = %path.display(), events = events.len(), "journal opened");
        Ok(Self {
            path,
            inner: Mutex::new(FileJournalInner { file, events }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the raw file contents. Returns the decoded events and the
    /// byte length of the valid newline-terminated prefix.
    fn recover(raw: &str) -> Result<(Vec<GameEvent>, usize), JournalError> {
        let mut events = Vec::new();
        let mut valid_len = 0usize;
        for line in raw.split_inclusive('\n') {
            if !line.ends_with('\n') {
                // Torn final line from a crash mid-write; drop it.
                break;
            }
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                valid_len += line.len();
                continue;
            }
            let event: GameEvent = serde_json::from_str(trimmed)
                .map_err(|e| JournalError::Serialization(format!("corrupt journal line: {e}")))?;
            events.push(event);
            valid_len += line.len();
        }
        Ok((events, valid_len))
    }
}

impl Journal for FileJournal {
    fn append_batch(&self, events: &[GameEvent]) -> Result<u64, JournalError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| JournalError::Storage("lock poisoned".to_string()))?;

        let mut buf = String::new();
        for event in events {
            let line = serde_json::to_string(event)
                .map_err(|e| JournalError::Serialization(e.to_string()))?;
            buf.push_str(&line);
            buf.push('\n');
        }

        // One write + one fsync per commit boundary: either every line of
        // the batch is durable, or recovery truncates the torn tail and
        // the batch is absent as a unit from the replica on reopen.
        inner
            .file
            .write_all(buf.as_bytes())
            .map_err(|e| JournalError::Storage(format!("append: {e}")))?;
        inner
            .file
            .flush()
            .map_err(|e| JournalError::Storage(format!("flush: {e}")))?;
        inner
            .file
            .sync_data()
            .map_err(|e| JournalError::Storage(format!("fsync: {e}")))?;

        let first = inner.events.len() as u64;
        inner.events.extend_from_slice(events);
        Ok(first)
    }

    fn load_all(&self) -> Result<Vec<GameEvent>, JournalError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| JournalError::Storage("lock poisoned".to_string()))?;
        Ok(inner.events.clone())
    }

    fn load_for_agent(&self, agent_id: &AgentId) -> Result<Vec<GameEvent>, JournalError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| JournalError::Storage("lock poisoned".to_string()))?;
        Ok(inner
            .events
            .iter()
            .filter(|e| e.agent_id == *agent_id)
            .cloned()
            .collect())
    }
}
