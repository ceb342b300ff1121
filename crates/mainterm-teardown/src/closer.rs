//! Resource Closer
//!
//! Saves modified buffers and removes everything except the marked session.

use mainterm_host::{BufferId, EditorHost};
use mainterm_session::SessionRegistry;

use crate::error::TeardownError;
use crate::Result;

pub struct ResourceCloser {
    registry: SessionRegistry,
}

impl ResourceCloser {
    pub fn new(registry: SessionRegistry) -> Self {
        Self { registry }
    }

    /// Write every loaded, modified, non-session buffer.
    ///
    /// Stops at the first failure: later buffers are neither visited nor
    /// saved, and the caller must not go on to delete anything. Focus moves
    /// to each buffer as it is written.
    pub fn write_modified_non_session_buffers(
        &self,
        host: &mut dyn EditorHost,
        force: bool,
    ) -> Result<Vec<BufferId>> {
        let pending: Vec<BufferId> = host
            .list_buffers()
            .into_iter()
            .filter(|id| host.buffer_info(*id).is_some_and(|info| info.needs_write()))
            .collect();

        let mut written = Vec::with_capacity(pending.len());
        for buffer in pending {
            host.focus_buffer(buffer)
                .map_err(|source| TeardownError::Focus { buffer, source })?;
            host.save_current(force)
                .map_err(|source| TeardownError::Write { buffer, source })?;

            tracing::debug!(buffer = %buffer, force, "Wrote buffer");
            written.push(buffer);
        }

        Ok(written)
    }

    /// Delete every listed buffer except the marked session.
    ///
    /// Unloaded buffers are checked before anything is deleted: with
    /// `include_unloaded` false any unmarked unloaded buffer refuses the
    /// whole operation, and with it true they still need `force`. A failed
    /// deletion stops the loop and earlier deletions stay in effect.
    pub fn delete_all_except_marked(
        &self,
        host: &mut dyn EditorHost,
        force: bool,
        include_unloaded: bool,
    ) -> Result<Vec<BufferId>> {
        let mut targets = Vec::new();
        for buffer in host.list_buffers() {
            if self.registry.carries_marker(buffer) {
                continue;
            }
            let Some(info) = host.buffer_info(buffer) else {
                continue;
            };

            if !info.loaded {
                if !include_unloaded {
                    return Err(TeardownError::UnloadedBuffer(buffer));
                }
                if !force {
                    return Err(TeardownError::UnloadedNeedsForce(buffer));
                }
            }
            targets.push(buffer);
        }

        let mut deleted = Vec::with_capacity(targets.len());
        for buffer in targets {
            // Already gone, e.g. wiped by an earlier deletion
            if host.buffer_info(buffer).is_none() {
                continue;
            }
            host.delete_buffer(buffer, force)
                .map_err(|source| TeardownError::Delete { buffer, source })?;

            deleted.push(buffer);
        }

        tracing::debug!(
            deleted = deleted.len(),
            force,
            include_unloaded,
            "Deleted buffers outside the main session"
        );

        Ok(deleted)
    }
}

impl Clone for ResourceCloser {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mainterm_host::{BufferKind, HostEvent, MemoryHost};

    fn guarded_host() -> (MemoryHost, SessionRegistry, BufferId) {
        let mut host = MemoryHost::new();
        let registry = SessionRegistry::new();
        let session = host.create_session_buffer().unwrap();
        registry.mark_main_session(&host, session).unwrap();
        (host, registry, session)
    }

    #[test]
    fn test_write_only_modified_normal_buffers() {
        let (mut host, registry, _session) = guarded_host();
        let a = host.edit("a.txt");
        let b = host.edit("b.txt");
        host.set_modified(b, true).unwrap();

        let closer = ResourceCloser::new(registry);
        let written = closer
            .write_modified_non_session_buffers(&mut host, false)
            .unwrap();

        assert_eq!(written, vec![b]);
        assert!(!host.buffer_info(b).unwrap().modified);
        assert!(!host.buffer_info(a).unwrap().modified);
    }

    #[test]
    fn test_write_aborts_on_first_failure() {
        let (mut host, registry, _session) = guarded_host();
        let a = host.edit("a.txt");
        let b = host.edit("b.txt");
        let c = host.edit("c.txt");
        for id in [a, b, c] {
            host.set_modified(id, true).unwrap();
        }
        host.fail_save_on(b);

        let closer = ResourceCloser::new(registry);
        let err = closer
            .write_modified_non_session_buffers(&mut host, true)
            .unwrap_err();

        assert!(matches!(err, TeardownError::Write { buffer, .. } if buffer == b));
        assert!(!host.buffer_info(a).unwrap().modified);
        assert!(host.buffer_info(b).unwrap().modified);
        // Never visited
        assert!(host.buffer_info(c).unwrap().modified);
        assert!(!host
            .journal()
            .contains(&HostEvent::Focused { buffer: c }));
    }

    #[test]
    fn test_write_stops_when_focus_refused() {
        let (mut host, registry, _session) = guarded_host();
        let a = host.edit("a.txt");
        let b = host.edit("b.txt");
        let c = host.edit("c.txt");
        for id in [a, b, c] {
            host.set_modified(id, true).unwrap();
        }
        host.fail_focus_on(b);

        let closer = ResourceCloser::new(registry);
        let err = closer
            .write_modified_non_session_buffers(&mut host, false)
            .unwrap_err();

        assert!(matches!(err, TeardownError::Focus { buffer, .. } if buffer == b));
        assert!(!host.buffer_info(a).unwrap().modified);
        assert!(host.buffer_info(b).unwrap().modified);
        assert!(host.buffer_info(c).unwrap().modified);
        assert!(!host
            .journal()
            .contains(&HostEvent::Focused { buffer: c }));
        assert!(!host
            .journal()
            .iter()
            .any(|e| matches!(e, HostEvent::Saved { buffer, .. } if *buffer == b || *buffer == c)));
    }

    #[test]
    fn test_delete_spares_marked_session() {
        let (mut host, registry, session) = guarded_host();
        let a = host.edit("a.txt");
        let b = host.edit("b.txt");

        let closer = ResourceCloser::new(registry);
        let deleted = closer
            .delete_all_except_marked(&mut host, false, false)
            .unwrap();

        assert!(deleted.contains(&a));
        assert!(deleted.contains(&b));
        assert_eq!(host.list_buffers(), vec![session]);
        assert!(host.is_loaded(session));
    }

    #[test]
    fn test_delete_refuses_unloaded_when_excluded() {
        let (mut host, registry, _session) = guarded_host();
        let a = host.edit("a.txt");
        let hidden = host.add_buffer(Some("hidden.txt".into()), BufferKind::Normal, false, false);

        let closer = ResourceCloser::new(registry);
        let err = closer
            .delete_all_except_marked(&mut host, true, false)
            .unwrap_err();

        assert!(matches!(err, TeardownError::UnloadedBuffer(id) if id == hidden));
        assert!(err.is_refusal());
        // Nothing was touched
        assert!(host.buffer_info(a).is_some());
        assert!(host.buffer_info(hidden).is_some());
    }

    #[test]
    fn test_delete_unloaded_needs_force() {
        let (mut host, registry, session) = guarded_host();
        let mut unloaded = Vec::new();
        for name in ["x.txt", "y.txt", "z.txt"] {
            unloaded.push(host.add_buffer(Some(name.into()), BufferKind::Normal, false, false));
        }
        let closer = ResourceCloser::new(registry);

        let err = closer
            .delete_all_except_marked(&mut host, false, true)
            .unwrap_err();
        assert!(matches!(err, TeardownError::UnloadedNeedsForce(id) if id == unloaded[0]));

        closer
            .delete_all_except_marked(&mut host, true, true)
            .unwrap();
        for id in &unloaded {
            assert!(host
                .journal()
                .contains(&HostEvent::Deleted { buffer: *id, force: true }));
        }
        assert_eq!(host.list_buffers(), vec![session]);
    }

    #[test]
    fn test_delete_failure_is_not_rolled_back() {
        let (mut host, registry, _session) = guarded_host();
        let first = BufferId::new(1);
        let a = host.edit("a.txt");
        let b = host.edit("b.txt");
        host.fail_delete_on(a);

        let closer = ResourceCloser::new(registry);
        let err = closer
            .delete_all_except_marked(&mut host, false, false)
            .unwrap_err();

        assert!(matches!(err, TeardownError::Delete { buffer, .. } if buffer == a));
        // The initial buffer was deleted before the failure and stays deleted
        assert!(host.buffer_info(first).is_none());
        assert!(host.buffer_info(a).is_some());
        assert!(host.buffer_info(b).is_some());
    }

    #[test]
    fn test_delete_modified_without_force_fails() {
        let (mut host, registry, _session) = guarded_host();
        let a = host.edit("a.txt");
        host.set_modified(a, true).unwrap();

        let closer = ResourceCloser::new(registry);
        let err = closer
            .delete_all_except_marked(&mut host, false, false)
            .unwrap_err();

        assert_eq!(err.buffer(), a);
        assert!(host.buffer_info(a).unwrap().modified);
    }
}
