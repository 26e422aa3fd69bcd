pub mod file_utils;

pub use file_utils::{ensure_dir_exists, expand_inputs, find_supported_files, save_json};
