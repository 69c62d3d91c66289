//! LED console Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benches can use `ledtris::{core,engine,...}`.

pub use ledtris_core as core;
pub use ledtris_engine as engine;
pub use ledtris_input as input;
pub use ledtris_term as term;
pub use ledtris_types as types;
