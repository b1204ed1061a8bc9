//! Memory Layer - In-Memory State Management
//!
//! 实现 SelectionStore，管理用户音色选择的内存状态

mod selection_store;

pub use selection_store::InMemorySelectionStore;
