//! In-Memory Selection Store Implementation

use dashmap::DashMap;

use crate::application::ports::SelectionStorePort;
use crate::domain::voice::{UserId, VoiceSelection};

/// 内存音色选择存储
///
/// DashMap 按键分片加锁，同一用户的读写互斥；进程重启后丢失
pub struct InMemorySelectionStore {
    selections: DashMap<UserId, VoiceSelection>,
}

impl InMemorySelectionStore {
    pub fn new() -> Self {
        Self {
            selections: DashMap::new(),
        }
    }
}

impl Default for InMemorySelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStorePort for InMemorySelectionStore {
    fn select(&self, user_id: UserId, selection: VoiceSelection) {
        let voice_id = selection.voice_id.clone();
        let selection_time = selection.selected_at;
        if let Some(previous) = self.selections.insert(user_id, selection) {
            tracing::debug!(
                user_id = %user_id,
                previous = %previous.voice_id,
                held_for_secs = (selection_time - previous.selected_at).num_seconds(),
                voice_id = %voice_id,
                "Voice selection replaced"
            );
        } else {
            tracing::debug!(user_id = %user_id, voice_id = %voice_id, "Voice selection created");
        }
    }

    fn get(&self, user_id: UserId) -> Option<VoiceSelection> {
        self.selections.get(&user_id).map(|s| s.clone())
    }

    fn len(&self) -> usize {
        self.selections.len()
    }
}
