// Layoutfix Core Library
// Layout-table construction and wrong-layout text transliteration

pub mod cache;
pub mod engine;
pub mod keystroke;
pub mod platform;
pub mod resolver;
pub mod settings;
pub mod table;

pub use cache::TableCache;
pub use engine::{ConvertResult, Direction, Transliterator};
pub use keystroke::{candidate_keys, vk_name, KeyStroke, VirtualKey};
pub use resolver::{
    installed_layout_ids, KeyResolver, LayoutError, LayoutHandle, StaticResolver,
};
pub use settings::{Settings, SettingsError};
pub use table::LayoutTable;

#[cfg(windows)]
pub use platform::WinApiResolver;
