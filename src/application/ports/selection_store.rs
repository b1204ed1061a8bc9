//! Selection Store Port - 用户音色选择
//!
//! 具体实现在 infrastructure/memory 层

use crate::domain::voice::{UserId, VoiceSelection};

/// Selection Store Port
///
/// 每个用户一条记录，选择时覆盖，进程内常驻，不过期
pub trait SelectionStorePort: Send + Sync {
    /// 记录（覆盖）用户的选择
    fn select(&self, user_id: UserId, selection: VoiceSelection);

    /// 获取用户当前的选择
    fn get(&self, user_id: UserId) -> Option<VoiceSelection>;

    /// 已选择音色的用户数
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
