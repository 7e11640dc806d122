//! Platform path resolution for config files.

pub mod xdg_root;
