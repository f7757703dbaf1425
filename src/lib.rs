//! Gemfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so binaries, integration
//! tests and benches can use `gemfall::{core, session, types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use gemfall_core as core;
pub use gemfall_session as session;
pub use gemfall_types as types;
