//! Per-buffer session record

use chrono::{DateTime, Utc};
use mainterm_host::BufferId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Buffer this record belongs to
    pub buffer: BufferId,
    /// Whether the buffer is the guarded main session
    pub is_main_session: bool,
    /// Buffer the user was viewing just before jumping into the session
    pub origin_buffer: Option<BufferId>,
    /// When the buffer was marked
    pub marked_at: DateTime<Utc>,
    /// When the origin link was last written
    pub origin_set_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    pub fn main_session(buffer: BufferId) -> Self {
        Self {
            buffer,
            is_main_session: true,
            origin_buffer: None,
            marked_at: Utc::now(),
            origin_set_at: None,
        }
    }

    /// Overwrite the origin link, returning the link it replaced
    pub fn set_origin(&mut self, origin: BufferId) -> Option<BufferId> {
        self.origin_set_at = Some(Utc::now());
        self.origin_buffer.replace(origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record() {
        let record = SessionRecord::main_session(BufferId::new(4));
        assert!(record.is_main_session);
        assert!(record.origin_buffer.is_none());
        assert!(record.origin_set_at.is_none());
    }

    #[test]
    fn test_origin_last_writer_wins() {
        let mut record = SessionRecord::main_session(BufferId::new(4));

        assert_eq!(record.set_origin(BufferId::new(1)), None);
        assert_eq!(record.set_origin(BufferId::new(2)), Some(BufferId::new(1)));
        assert_eq!(record.origin_buffer, Some(BufferId::new(2)));
        assert!(record.origin_set_at.is_some());
    }
}
