//! Hexagram construction: six lines → two trigrams → name → palace.
//!
//! Lines are ordered bottom (position 0) to top (position 5). Naming and
//! palace metadata depend only on the yang/yin pattern; moving flags are
//! carried through untouched.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::LiuyaoError;
use crate::hexagram_data::{PalaceCategory, hexagram_name, palace_entry};
use crate::trigram::Trigram;

/// Number of lines in a hexagram.
pub const LINE_COUNT: usize = 6;

/// Caller-supplied state of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineSpec {
    pub is_yang: bool,
    pub is_moving: bool,
}

impl LineSpec {
    pub const fn new(is_yang: bool, is_moving: bool) -> Self {
        Self { is_yang, is_moving }
    }

    /// Unchanging yang line.
    pub const fn yang() -> Self {
        Self::new(true, false)
    }

    /// Unchanging yin line.
    pub const fn yin() -> Self {
        Self::new(false, false)
    }
}

/// A placed line of a built hexagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Line {
    /// 0-based position, bottom to top.
    pub position: u8,
    pub is_yang: bool,
    pub is_moving: bool,
}

/// 6-bit pattern of a hexagram: bit i set when line i is yang.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct HexagramCode(u8);

impl HexagramCode {
    /// Wrap a raw 6-bit value. Returns `None` above 63.
    pub const fn new(bits: u8) -> Option<Self> {
        if bits < 64 { Some(Self(bits)) } else { None }
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Code of a line-polarity pattern, bottom to top.
    pub fn from_polarities(yang: [bool; LINE_COUNT]) -> Self {
        Self(
            yang.iter()
                .enumerate()
                .fold(0u8, |acc, (i, &y)| acc | ((y as u8) << i)),
        )
    }

    /// Whether line `position` is yang.
    pub const fn is_yang(self, position: usize) -> bool {
        self.0 & (1 << position) != 0
    }

    /// Line polarities bottom to top.
    pub fn polarities(self) -> [bool; LINE_COUNT] {
        std::array::from_fn(|i| self.is_yang(i))
    }

    /// Lower trigram (lines 0..=2).
    pub const fn lower(self) -> Trigram {
        Trigram::from_lines(self.is_yang(0), self.is_yang(1), self.is_yang(2))
    }

    /// Upper trigram (lines 3..=5).
    pub const fn upper(self) -> Trigram {
        Trigram::from_lines(self.is_yang(3), self.is_yang(4), self.is_yang(5))
    }

    /// Bottom→top binary string, e.g. `"101010"`.
    pub fn bit_string(self) -> String {
        (0..LINE_COUNT)
            .map(|i| if self.is_yang(i) { '1' } else { '0' })
            .collect()
    }
}

impl FromStr for HexagramCode {
    type Err = LiuyaoError;

    /// Parse a bottom→top binary string of exactly six `0`/`1` characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.len() != LINE_COUNT || !t.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(LiuyaoError::input(format!(
                "hexagram code must be six 0/1 digits bottom to top, got {s:?}"
            )));
        }
        let mut yang = [false; LINE_COUNT];
        for (slot, b) in yang.iter_mut().zip(t.bytes()) {
            *slot = b == b'1';
        }
        Ok(Self::from_polarities(yang))
    }
}

impl Display for HexagramCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.bit_string())
    }
}

/// A built hexagram with its trigrams, name and palace metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hexagram {
    pub lines: [Line; LINE_COUNT],
    pub lower: Trigram,
    pub upper: Trigram,
    pub code: HexagramCode,
    pub name: &'static str,
    /// Palace (originating doubled trigram).
    pub palace: Trigram,
    pub category: PalaceCategory,
    /// 0-based self (shi) line.
    pub self_index: u8,
    /// 0-based response (ying) line.
    pub response_index: u8,
}

impl Hexagram {
    /// Element of the palace; the anchor for kinship classification.
    pub const fn palace_element(&self) -> Element {
        self.palace.element()
    }

    /// Number of moving lines.
    pub fn moving_count(&self) -> usize {
        self.lines.iter().filter(|l| l.is_moving).count()
    }

    /// Line specs as supplied (polarity and moving flag).
    pub fn specs(&self) -> [LineSpec; LINE_COUNT] {
        self.lines.map(|l| LineSpec::new(l.is_yang, l.is_moving))
    }

    pub fn is_wandering_soul(&self) -> bool {
        self.category == PalaceCategory::WanderingSoul
    }

    pub fn is_returning_soul(&self) -> bool {
        self.category == PalaceCategory::ReturningSoul
    }
}

/// Build a hexagram from exactly six line specs, bottom to top.
pub fn build_hexagram(lines: &[LineSpec]) -> Result<Hexagram, LiuyaoError> {
    let specs: &[LineSpec; LINE_COUNT] = lines.try_into().map_err(|_| {
        LiuyaoError::input(format!("need {LINE_COUNT} lines, got {}", lines.len()))
    })?;
    assemble(*specs)
}

/// Build an unchanging hexagram from its 6-bit code.
pub fn hexagram_from_code(code: HexagramCode) -> Result<Hexagram, LiuyaoError> {
    assemble(code.polarities().map(|y| LineSpec::new(y, false)))
}

/// Shared construction path: every hexagram (base, variant, mutual) is
/// rebuilt from its full line pattern, never patched.
pub(crate) fn assemble(specs: [LineSpec; LINE_COUNT]) -> Result<Hexagram, LiuyaoError> {
    let code = HexagramCode::from_polarities(specs.map(|s| s.is_yang));
    let lower = code.lower();
    let upper = code.upper();
    let entry = palace_entry(code.bits())?;

    let mut position = 0u8;
    let lines = specs.map(|s| {
        let line = Line {
            position,
            is_yang: s.is_yang,
            is_moving: s.is_moving,
        };
        position += 1;
        line
    });

    Ok(Hexagram {
        lines,
        lower,
        upper,
        code,
        name: hexagram_name(upper, lower),
        palace: entry.palace,
        category: entry.category,
        self_index: entry.self_index,
        response_index: entry.response_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alternating() -> Vec<LineSpec> {
        (0..6).map(|i| LineSpec::new(i % 2 == 0, false)).collect()
    }

    #[test]
    fn wrong_line_count_is_input_error() {
        let five = vec![LineSpec::yang(); 5];
        assert!(matches!(build_hexagram(&five), Err(LiuyaoError::InputValidation(_))));
        let seven = vec![LineSpec::yang(); 7];
        assert!(matches!(build_hexagram(&seven), Err(LiuyaoError::InputValidation(_))));
        assert!(build_hexagram(&[]).is_err());
    }

    #[test]
    fn alternating_lines() {
        let hex = build_hexagram(&alternating()).unwrap();
        assert_eq!(hex.code.bit_string(), "101010");
        assert_eq!(hex.lower, Trigram::Li);
        assert_eq!(hex.upper, Trigram::Kan);
        assert_eq!(hex.name, "水火既济");
    }

    #[test]
    fn positions_run_bottom_to_top() {
        let hex = build_hexagram(&alternating()).unwrap();
        for (i, l) in hex.lines.iter().enumerate() {
            assert_eq!(l.position as usize, i);
        }
    }

    #[test]
    fn moving_flags_preserved() {
        let mut lines = vec![LineSpec::yang(); 6];
        lines[2].is_moving = true;
        let hex = build_hexagram(&lines).unwrap();
        assert!(hex.lines[2].is_moving);
        assert_eq!(hex.moving_count(), 1);
        assert_eq!(hex.name, "乾为天");
    }

    #[test]
    fn code_string_round_trip() {
        let code: HexagramCode = "011111".parse().unwrap();
        assert_eq!(code.bits(), 0b111110);
        assert_eq!(code.to_string(), "011111");
        assert!("01111".parse::<HexagramCode>().is_err());
        assert!("01111x".parse::<HexagramCode>().is_err());
    }

    #[test]
    fn code_new_bounds() {
        assert!(HexagramCode::new(63).is_some());
        assert!(HexagramCode::new(64).is_none());
    }

    #[test]
    fn from_code_has_no_moving_lines() {
        let hex = hexagram_from_code(HexagramCode::new(0b111111).unwrap()).unwrap();
        assert_eq!(hex.moving_count(), 0);
        assert_eq!(hex.palace, Trigram::Qian);
    }
}
