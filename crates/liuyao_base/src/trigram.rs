//! The eight trigrams (ba gua).
//!
//! A trigram is three consecutive lines. Its 3-bit code reads the lines
//! bottom, middle, top as the high, middle and low bit (1 = yang), so
//! Zhen (yang at the bottom) is `0b100` and Gen (yang on top) is `0b001`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::LiuyaoError;

/// The eight trigrams, in Earlier-Heaven order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Trigram {
    Qian,
    Dui,
    Li,
    Zhen,
    Xun,
    Kan,
    Gen,
    Kun,
}

/// All 8 trigrams in Earlier-Heaven order (index 0 = Qian).
pub const ALL_TRIGRAMS: [Trigram; 8] = [
    Trigram::Qian,
    Trigram::Dui,
    Trigram::Li,
    Trigram::Zhen,
    Trigram::Xun,
    Trigram::Kan,
    Trigram::Gen,
    Trigram::Kun,
];

/// Trigram by 3-bit (bottom, middle, top) code.
const TRIGRAM_BY_CODE: [Trigram; 8] = [
    Trigram::Kun,  // 000
    Trigram::Gen,  // 001
    Trigram::Kan,  // 010
    Trigram::Xun,  // 011
    Trigram::Zhen, // 100
    Trigram::Li,   // 101
    Trigram::Dui,  // 110
    Trigram::Qian, // 111
];

impl Trigram {
    /// Chinese glyph.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Qian => "乾",
            Self::Dui => "兑",
            Self::Li => "离",
            Self::Zhen => "震",
            Self::Xun => "巽",
            Self::Kan => "坎",
            Self::Gen => "艮",
            Self::Kun => "坤",
        }
    }

    /// Natural image glyph, used to compose hexagram names.
    pub const fn image(self) -> &'static str {
        match self {
            Self::Qian => "天",
            Self::Dui => "泽",
            Self::Li => "火",
            Self::Zhen => "雷",
            Self::Xun => "风",
            Self::Kan => "水",
            Self::Gen => "山",
            Self::Kun => "地",
        }
    }

    /// English image name.
    pub const fn english(self) -> &'static str {
        match self {
            Self::Qian => "Heaven",
            Self::Dui => "Lake",
            Self::Li => "Fire",
            Self::Zhen => "Thunder",
            Self::Xun => "Wind",
            Self::Kan => "Water",
            Self::Gen => "Mountain",
            Self::Kun => "Earth",
        }
    }

    /// Pinyin spelling.
    pub const fn pinyin(self) -> &'static str {
        match self {
            Self::Qian => "qian",
            Self::Dui => "dui",
            Self::Li => "li",
            Self::Zhen => "zhen",
            Self::Xun => "xun",
            Self::Kan => "kan",
            Self::Gen => "gen",
            Self::Kun => "kun",
        }
    }

    /// 0-based Earlier-Heaven index (Qian=0 .. Kun=7).
    pub const fn index(self) -> u8 {
        match self {
            Self::Qian => 0,
            Self::Dui => 1,
            Self::Li => 2,
            Self::Zhen => 3,
            Self::Xun => 4,
            Self::Kan => 5,
            Self::Gen => 6,
            Self::Kun => 7,
        }
    }

    /// Earlier-Heaven number (Qian=1 .. Kun=8), used by number casting.
    pub const fn xiantian_number(self) -> u8 {
        self.index() + 1
    }

    /// Trigram for an Earlier-Heaven number 1..=8.
    pub fn from_xiantian_number(n: u8) -> Option<Trigram> {
        ALL_TRIGRAMS.get((n as usize).checked_sub(1)?).copied()
    }

    /// Trigram for a 3-bit code; only the low three bits are read.
    pub const fn from_code(code: u8) -> Trigram {
        TRIGRAM_BY_CODE[(code & 0b111) as usize]
    }

    /// Trigram for three line polarities, bottom to top.
    pub const fn from_lines(bottom: bool, middle: bool, top: bool) -> Trigram {
        Self::from_code(((bottom as u8) << 2) | ((middle as u8) << 1) | top as u8)
    }

    /// 3-bit (bottom, middle, top) code.
    pub const fn code(self) -> u8 {
        match self {
            Self::Kun => 0b000,
            Self::Gen => 0b001,
            Self::Kan => 0b010,
            Self::Xun => 0b011,
            Self::Zhen => 0b100,
            Self::Li => 0b101,
            Self::Dui => 0b110,
            Self::Qian => 0b111,
        }
    }

    /// Line polarities bottom to top (true = yang).
    pub const fn lines(self) -> [bool; 3] {
        let c = self.code();
        [c & 0b100 != 0, c & 0b010 != 0, c & 0b001 != 0]
    }

    /// Element of the trigram; also the element of its palace.
    pub const fn element(self) -> Element {
        match self {
            Self::Qian | Self::Dui => Element::Metal,
            Self::Li => Element::Fire,
            Self::Zhen | Self::Xun => Element::Wood,
            Self::Kan => Element::Water,
            Self::Gen | Self::Kun => Element::Earth,
        }
    }
}

impl FromStr for Trigram {
    type Err = LiuyaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        ALL_TRIGRAMS
            .iter()
            .copied()
            .find(|g| g.name() == t || g.pinyin().eq_ignore_ascii_case(t))
            .ok_or_else(|| LiuyaoError::input(format!("unknown trigram: {s:?}")))
    }
}

impl std::fmt::Display for Trigram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
