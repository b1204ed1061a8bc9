//! Voice Context - 音色目录

use std::collections::HashMap;

use super::{VoiceId, VoiceName};

/// 服务商不允许列出音色时使用的目录项名称
pub const FALLBACK_VOICE_NAME: &str = "Default";

/// 音色目录中的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceEntry {
    pub name: VoiceName,
    pub id: VoiceId,
}

impl VoiceEntry {
    pub fn new(name: VoiceName, id: VoiceId) -> Self {
        Self { name, id }
    }
}

/// 音色目录
///
/// 不变量:
/// - 显示名称唯一（键盘按钮文本与反查 VoiceId 的键）
/// - 启动时加载一次，之后只读
#[derive(Debug, Clone, Default)]
pub struct VoiceCatalog {
    entries: Vec<VoiceEntry>,
    by_name: HashMap<String, VoiceId>,
}

impl VoiceCatalog {
    /// 按服务商返回的顺序构建目录，重名时保留第一个
    pub fn from_entries(entries: impl IntoIterator<Item = VoiceEntry>) -> Self {
        let mut catalog = Self::default();
        for entry in entries {
            if catalog.by_name.contains_key(entry.name.as_str()) {
                tracing::warn!(
                    name = %entry.name,
                    voice_id = %entry.id,
                    "Duplicate voice name in catalog, keeping first"
                );
                continue;
            }
            catalog
                .by_name
                .insert(entry.name.as_str().to_string(), entry.id.clone());
            catalog.entries.push(entry);
        }
        catalog
    }

    /// 只有一个 "Default" 项的目录
    pub fn fallback(voice_id: VoiceId) -> Self {
        let name = VoiceName::new_unchecked(FALLBACK_VOICE_NAME);
        Self::from_entries([VoiceEntry::new(name, voice_id)])
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn voice_id(&self, name: &str) -> Option<&VoiceId> {
        self.by_name.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &VoiceName> {
        self.entries.iter().map(|e| &e.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
