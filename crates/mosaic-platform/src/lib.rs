pub mod input;
pub mod keymap;
pub mod paths;
pub mod winit_keys;

pub use input::{HotkeyRegistry, KeyCombo};
pub use keymap::{parse_keybind, KeyBind, Modifier};
pub use paths::{
    config_dir, data_dir, ensure_dirs, partition_dir, partitions_dir, remove_partition,
};
pub use winit_keys::normalize_winit_key;
