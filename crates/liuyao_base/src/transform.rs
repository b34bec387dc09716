//! Structural transforms of a built hexagram: variant (bian gua) and
//! mutual (hu gua).

use crate::error::LiuyaoError;
use crate::hexagram::{Hexagram, LINE_COUNT, LineSpec, assemble};

/// Flip every moving line, clear all moving flags, and rebuild.
///
/// With no moving lines the result equals the input hexagram.
pub fn derive_variant(hex: &Hexagram) -> Result<Hexagram, LiuyaoError> {
    let specs = hex.lines.map(|l| LineSpec::new(l.is_yang ^ l.is_moving, false));
    assemble(specs)
}

/// Line positions composing the mutual hexagram: lower trigram from lines
/// 1..=3, upper trigram from lines 2..=4 (0-based).
pub const MUTUAL_POSITIONS: [usize; LINE_COUNT] = [1, 2, 3, 2, 3, 4];

/// Interlock the inner lines into a new hexagram. Moving flags are ignored.
pub fn derive_mutual(hex: &Hexagram) -> Result<Hexagram, LiuyaoError> {
    let specs = MUTUAL_POSITIONS.map(|p| LineSpec::new(hex.lines[p].is_yang, false));
    assemble(specs)
}
