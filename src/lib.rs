//! Esper pipeline — semantic expressions in, glyphs out.
//!
//! Three fixed stages turn a raw semantic expression into a pictographic
//! token: the crystallizer validates and fills defaults, the narrative
//! engine annotates discourse sequencing, and the compositor renders the
//! final glyph. Each stage is a pure function over immutable records.

pub mod core;
pub mod schema;
