//! Common Framework
//!
//! Source-location primitives shared by the lexer framework and its front ends.

pub mod position;
pub mod span;
pub mod text_slice;

pub use position::Position;
pub use span::Span;
pub use text_slice::TextSlice;
