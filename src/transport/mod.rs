//! Transport layer: the editor process and the socket it listens on
//!
//! The RPC protocol itself belongs to `nvim-rs`; this module only gets a
//! process running and tells the [`rpc`](crate::rpc) layer where to connect.

pub mod subprocess;

pub use subprocess::{CommandBuilder, NvimProcess};
