//! Session Registry
//!
//! The single place that answers "which buffer is the guarded session".
//! Every other component asks here instead of inspecting buffers itself.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use mainterm_host::{BufferId, BufferKind, EditorHost};

use crate::error::SessionError;
use crate::record::SessionRecord;
use crate::Result;

pub struct SessionRegistry {
    /// Records keyed by buffer
    records: Arc<RwLock<HashMap<BufferId, SessionRecord>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Mark a session buffer as the guarded main session
    pub fn mark_main_session(
        &self,
        host: &dyn EditorHost,
        buffer: BufferId,
    ) -> Result<SessionRecord> {
        let info = host
            .buffer_info(buffer)
            .ok_or(SessionError::NoSuchBuffer(buffer))?;
        if info.kind != BufferKind::Session {
            return Err(SessionError::NotASession(buffer));
        }

        let mut records = self.records.write();

        // Any record whose buffer is still listed counts, loaded or not
        if let Some(existing) = records
            .values()
            .filter(|r| r.is_main_session && r.buffer != buffer)
            .map(|r| r.buffer)
            .find(|id| host.buffer_info(*id).is_some())
        {
            return Err(SessionError::AlreadyMarked(existing));
        }

        let record = records
            .entry(buffer)
            .or_insert_with(|| SessionRecord::main_session(buffer))
            .clone();

        tracing::info!(buffer = %buffer, "Marked main session");

        Ok(record)
    }

    /// Marked sessions in host enumeration order.
    ///
    /// The order is stable but carries no meaning beyond "first".
    pub fn find_marked_sessions(&self, host: &dyn EditorHost) -> Vec<BufferId> {
        host.list_buffers()
            .into_iter()
            .filter(|id| self.is_marked(host, *id))
            .collect()
    }

    pub fn first_marked(&self, host: &dyn EditorHost) -> Option<BufferId> {
        self.find_marked_sessions(host).into_iter().next()
    }

    pub fn has_marked(&self, host: &dyn EditorHost) -> bool {
        self.first_marked(host).is_some()
    }

    /// True iff `buffer` is a loaded session buffer carrying the marker.
    /// Freed or unloaded handles yield false.
    pub fn is_marked(&self, host: &dyn EditorHost, buffer: BufferId) -> bool {
        let Some(info) = host.buffer_info(buffer) else {
            return false;
        };
        info.loaded && info.kind == BufferKind::Session && self.carries_marker(buffer)
    }

    /// Whether a record marks `buffer` as main session, regardless of its
    /// current load state
    pub fn carries_marker(&self, buffer: BufferId) -> bool {
        self.records
            .read()
            .get(&buffer)
            .is_some_and(|r| r.is_main_session)
    }

    pub fn record(&self, buffer: BufferId) -> Option<SessionRecord> {
        self.records.read().get(&buffer).cloned()
    }

    /// Record `origin` as the buffer to return to from `session`.
    /// Returns the link it overwrote.
    pub fn set_origin(&self, session: BufferId, origin: BufferId) -> Result<Option<BufferId>> {
        let mut records = self.records.write();
        let record = records
            .get_mut(&session)
            .ok_or(SessionError::NotMarked(session))?;

        let previous = record.set_origin(origin);

        tracing::debug!(
            session = %session,
            origin = %origin,
            previous = ?previous,
            "Recorded origin link"
        );

        Ok(previous)
    }

    pub fn origin(&self, session: BufferId) -> Option<BufferId> {
        self.records
            .read()
            .get(&session)
            .and_then(|r| r.origin_buffer)
    }

    /// Drop the record of a buffer
    pub fn forget(&self, buffer: BufferId) -> Option<SessionRecord> {
        self.records.write().remove(&buffer)
    }

    /// Drop records whose buffer the host no longer knows about
    pub fn prune(&self, host: &dyn EditorHost) -> usize {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|id, _| host.buffer_info(*id).is_some());
        let removed = before - records.len();

        if removed > 0 {
            tracing::debug!(removed, "Pruned session records");
        }

        removed
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SessionRegistry {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}
