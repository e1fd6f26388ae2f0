//! Configuration parsing
//!
//! vibe-test reads an optional `vibe-test.yml` from the project root. Every
//! section is optional and falls back to the defaults the runner ships with.

pub mod vibe;

pub use vibe::{load_vibe_config, parse_vibe_config, VibeConfig, DEFAULT_CONFIG_FILE};
