//! LR(1) shift-reduce parsing with closures computed on the fly.
//!
//! Grammars are declared as `static` productions over text, terminal and
//! production symbols. A [`Parser`] pulls tokens from any iterator of
//! [`LexResult<Token>`], and builds a tree of [`ParseNode`] tagged through a
//! [`NodeRegistry`].
pub use lrkit_core::*;
