//! Shared helpers for integration tests

#![allow(dead_code)]

use nvim_agent::{NvimProcess, SessionOptions};

/// Initialise test logging once per test binary
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Options for a real editor, or `None` (with a log line) when no `nvim` is installed
pub fn nvim_options() -> Option<SessionOptions> {
    init_logging();

    let options = match SessionOptions::from_env() {
        Ok(options) => options,
        Err(e) => {
            log::warn!("skipping: {e}");
            return None;
        }
    };

    let found = match options.nvim_path {
        Some(ref path) => path.exists(),
        None => NvimProcess::find_nvim().is_ok(),
    };
    if !found {
        log::warn!("skipping: nvim not installed");
        eprintln!("nvim not installed, skipping");
        return None;
    }

    Some(options)
}

/// Same as [`nvim_options`] with the buffer seeded with `lines`
pub fn nvim_options_with(lines: &[&str]) -> Option<SessionOptions> {
    let options = nvim_options()?;
    Some(
        nvim_agent::SessionOptionsBuilder::from_options(options)
            .initial_content(lines.iter().copied())
            .build(),
    )
}
