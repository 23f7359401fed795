//! Command-line building for the headless editor

use std::path::Path;
use tokio::process::Command;

use crate::types::options::SessionOptions;

use super::config::{ALLOWED_EXTRA_FLAGS, BASE_ARGS, DANGEROUS_ENV_VARS};

/// Command builder for `nvim --headless`
pub struct CommandBuilder<'a> {
    nvim_path: &'a Path,
    socket_path: &'a Path,
    options: &'a SessionOptions,
}

impl<'a> CommandBuilder<'a> {
    /// Create a new command builder
    pub fn new(nvim_path: &'a Path, socket_path: &'a Path, options: &'a SessionOptions) -> Self {
        Self {
            nvim_path,
            socket_path,
            options,
        }
    }

    /// Build the complete command with all arguments and environment
    pub fn build(&self) -> Command {
        let mut cmd = Command::new(self.nvim_path);

        cmd.arg("--headless").arg("--listen").arg(self.socket_path);
        cmd.args(BASE_ARGS);

        for arg in self.extra_args() {
            cmd.arg(arg);
        }

        for (key, value) in &self.options.env {
            if DANGEROUS_ENV_VARS.contains(&key.as_str()) {
                log::warn!("Refusing to pass {key} to nvim");
                continue;
            }
            cmd.env(key, value);
        }

        if let Some(ref cwd) = self.options.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Allowlisted extra arguments, flattened in order
    pub fn extra_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for (flag, value) in &self.options.extra_args {
            if !ALLOWED_EXTRA_FLAGS.contains(&flag.as_str()) {
                log::warn!("Dropping nvim flag not on the allowlist: {flag}");
                continue;
            }
            args.push(flag.clone());
            if let Some(v) = value {
                args.push(v.clone());
            }
        }
        args
    }
}
