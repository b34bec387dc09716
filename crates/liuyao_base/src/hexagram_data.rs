//! Fixed hexagram tables: the 8×8 name matrix and the 64-entry palace table.
//!
//! Palace table follows the Jing Fang eight-palace arrangement. Each
//! palace starts from its doubled trigram (native), flips lines 1..=5
//! cumulatively (1st..5th world), flips line 4 back (wandering soul), and
//! restores the lower trigram (returning soul). Codes are written as
//! bottom→top binary strings.

use serde::Serialize;

use crate::error::LiuyaoError;
use crate::trigram::Trigram;

/// Position of a hexagram within its palace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PalaceCategory {
    Native,
    FirstWorld,
    SecondWorld,
    ThirdWorld,
    FourthWorld,
    FifthWorld,
    WanderingSoul,
    ReturningSoul,
}

/// All 8 categories in palace order.
pub const ALL_PALACE_CATEGORIES: [PalaceCategory; 8] = [
    PalaceCategory::Native,
    PalaceCategory::FirstWorld,
    PalaceCategory::SecondWorld,
    PalaceCategory::ThirdWorld,
    PalaceCategory::FourthWorld,
    PalaceCategory::FifthWorld,
    PalaceCategory::WanderingSoul,
    PalaceCategory::ReturningSoul,
];

impl PalaceCategory {
    /// Chinese name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Native => "本宫",
            Self::FirstWorld => "一世",
            Self::SecondWorld => "二世",
            Self::ThirdWorld => "三世",
            Self::FourthWorld => "四世",
            Self::FifthWorld => "五世",
            Self::WanderingSoul => "游魂",
            Self::ReturningSoul => "归魂",
        }
    }

    /// 0-based index of the self (shi) line.
    pub const fn self_index(self) -> u8 {
        match self {
            Self::Native => 5,
            Self::FirstWorld => 0,
            Self::SecondWorld => 1,
            Self::ThirdWorld | Self::ReturningSoul => 2,
            Self::FourthWorld | Self::WanderingSoul => 3,
            Self::FifthWorld => 4,
        }
    }

    /// 0-based index of the response (ying) line, always three away from self.
    pub const fn response_index(self) -> u8 {
        (self.self_index() + 3) % 6
    }
}

impl std::str::FromStr for PalaceCategory {
    type Err = LiuyaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        ALL_PALACE_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.name() == t || format!("{c:?}").eq_ignore_ascii_case(t))
            .ok_or_else(|| LiuyaoError::input(format!("unknown palace category: {s:?}")))
    }
}

impl std::fmt::Display for PalaceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the palace table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PalaceEntry {
    /// 6-bit code, bit i = line i (bottom = bit 0).
    pub code: u8,
    /// Palace (originating doubled trigram).
    pub palace: Trigram,
    pub category: PalaceCategory,
    /// 0-based self line.
    pub self_index: u8,
    /// 0-based response line.
    pub response_index: u8,
}

/// Parse a bottom→top binary string into a 6-bit code.
const fn code_of(bits: &str) -> u8 {
    let b = bits.as_bytes();
    let mut code = 0u8;
    let mut i = 0;
    while i < b.len() {
        if b[i] == b'1' {
            code |= 1 << i;
        }
        i += 1;
    }
    code
}

const fn entry(bits: &str, palace: Trigram, category: PalaceCategory) -> PalaceEntry {
    PalaceEntry {
        code: code_of(bits),
        palace,
        category,
        self_index: category.self_index(),
        response_index: category.response_index(),
    }
}

use PalaceCategory::{
    FifthWorld, FirstWorld, FourthWorld, Native, ReturningSoul, SecondWorld, ThirdWorld,
    WanderingSoul,
};
use Trigram::{Dui, Gen, Kan, Kun, Li, Qian, Xun, Zhen};

/// The 64 hexagrams grouped by palace.
pub const PALACE_TABLE: [PalaceEntry; 64] = [
    // 乾宫 (metal)
    entry("111111", Qian, Native),        // 乾为天
    entry("011111", Qian, FirstWorld),    // 天风姤
    entry("001111", Qian, SecondWorld),   // 天山遁
    entry("000111", Qian, ThirdWorld),    // 天地否
    entry("000011", Qian, FourthWorld),   // 风地观
    entry("000001", Qian, FifthWorld),    // 山地剥
    entry("000101", Qian, WanderingSoul), // 火地晋
    entry("111101", Qian, ReturningSoul), // 火天大有
    // 兑宫 (metal)
    entry("110110", Dui, Native),        // 兑为泽
    entry("010110", Dui, FirstWorld),    // 泽水困
    entry("000110", Dui, SecondWorld),   // 泽地萃
    entry("001110", Dui, ThirdWorld),    // 泽山咸
    entry("001010", Dui, FourthWorld),   // 水山蹇
    entry("001000", Dui, FifthWorld),    // 地山谦
    entry("001100", Dui, WanderingSoul), // 雷山小过
    entry("110100", Dui, ReturningSoul), // 雷泽归妹
    // 离宫 (fire)
    entry("101101", Li, Native),        // 离为火
    entry("001101", Li, FirstWorld),    // 火山旅
    entry("011101", Li, SecondWorld),   // 火风鼎
    entry("010101", Li, ThirdWorld),    // 火水未济
    entry("010001", Li, FourthWorld),   // 山水蒙
    entry("010011", Li, FifthWorld),    // 风水涣
    entry("010111", Li, WanderingSoul), // 天水讼
    entry("101111", Li, ReturningSoul), // 天火同人
    // 震宫 (wood)
    entry("100100", Zhen, Native),        // 震为雷
    entry("000100", Zhen, FirstWorld),    // 雷地豫
    entry("010100", Zhen, SecondWorld),   // 雷水解
    entry("011100", Zhen, ThirdWorld),    // 雷风恒
    entry("011000", Zhen, FourthWorld),   // 地风升
    entry("011010", Zhen, FifthWorld),    // 水风井
    entry("011110", Zhen, WanderingSoul), // 泽风大过
    entry("100110", Zhen, ReturningSoul), // 泽雷随
    // 巽宫 (wood)
    entry("011011", Xun, Native),        // 巽为风
    entry("111011", Xun, FirstWorld),    // 风天小畜
    entry("101011", Xun, SecondWorld),   // 风火家人
    entry("100011", Xun, ThirdWorld),    // 风雷益
    entry("100111", Xun, FourthWorld),   // 天雷无妄
    entry("100101", Xun, FifthWorld),    // 火雷噬嗑
    entry("100001", Xun, WanderingSoul), // 山雷颐
    entry("011001", Xun, ReturningSoul), // 山风蛊
    // 坎宫 (water)
    entry("010010", Kan, Native),        // 坎为水
    entry("110010", Kan, FirstWorld),    // 水泽节
    entry("100010", Kan, SecondWorld),   // 水雷屯
    entry("101010", Kan, ThirdWorld),    // 水火既济
    entry("101110", Kan, FourthWorld),   // 泽火革
    entry("101100", Kan, FifthWorld),    // 雷火丰
    entry("101000", Kan, WanderingSoul), // 地火明夷
    entry("010000", Kan, ReturningSoul), // 地水师
    // 艮宫 (earth)
    entry("001001", Gen, Native),        // 艮为山
    entry("101001", Gen, FirstWorld),    // 山火贲
    entry("111001", Gen, SecondWorld),   // 山天大畜
    entry("110001", Gen, ThirdWorld),    // 山泽损
    entry("110101", Gen, FourthWorld),   // 火泽睽
    entry("110111", Gen, FifthWorld),    // 天泽履
    entry("110011", Gen, WanderingSoul), // 风泽中孚
    entry("001011", Gen, ReturningSoul), // 风山渐
    // 坤宫 (earth)
    entry("000000", Kun, Native),        // 坤为地
    entry("100000", Kun, FirstWorld),    // 地雷复
    entry("110000", Kun, SecondWorld),   // 地泽临
    entry("111000", Kun, ThirdWorld),    // 地天泰
    entry("111100", Kun, FourthWorld),   // 雷天大壮
    entry("111110", Kun, FifthWorld),    // 泽天夬
    entry("111010", Kun, WanderingSoul), // 水天需
    entry("000010", Kun, ReturningSoul), // 水地比
];

/// Hexagram names indexed `[upper.index()][lower.index()]`.
pub const HEXAGRAM_NAMES: [[&str; 8]; 8] = [
    // upper 乾
    ["乾为天", "天泽履", "天火同人", "天雷无妄", "天风姤", "天水讼", "天山遁", "天地否"],
    // upper 兑
    ["泽天夬", "兑为泽", "泽火革", "泽雷随", "泽风大过", "泽水困", "泽山咸", "泽地萃"],
    // upper 离
    ["火天大有", "火泽睽", "离为火", "火雷噬嗑", "火风鼎", "火水未济", "火山旅", "火地晋"],
    // upper 震
    ["雷天大壮", "雷泽归妹", "雷火丰", "震为雷", "雷风恒", "雷水解", "雷山小过", "雷地豫"],
    // upper 巽
    ["风天小畜", "风泽中孚", "风火家人", "风雷益", "巽为风", "风水涣", "风山渐", "风地观"],
    // upper 坎
    ["水天需", "水泽节", "水火既济", "水雷屯", "水风井", "坎为水", "水山蹇", "水地比"],
    // upper 艮
    ["山天大畜", "山泽损", "山火贲", "山雷颐", "山风蛊", "山水蒙", "艮为山", "山地剥"],
    // upper 坤
    ["地天泰", "地泽临", "地火明夷", "地雷复", "地风升", "地水师", "地山谦", "坤为地"],
];

/// Display name for an (upper, lower) trigram pair.
pub const fn hexagram_name(upper: Trigram, lower: Trigram) -> &'static str {
    HEXAGRAM_NAMES[upper.index() as usize][lower.index() as usize]
}

/// Palace metadata for a 6-bit code.
pub fn palace_entry(code: u8) -> Result<&'static PalaceEntry, LiuyaoError> {
    PALACE_TABLE
        .iter()
        .find(|e| e.code == code)
        .ok_or_else(|| LiuyaoError::lookup(format!("no palace entry for code {code:#08b}")))
}

/// The native (doubled-trigram) entry of a palace.
pub fn native_entry(palace: Trigram) -> Result<&'static PalaceEntry, LiuyaoError> {
    PALACE_TABLE
        .iter()
        .find(|e| e.palace == palace && e.category == PalaceCategory::Native)
        .ok_or_else(|| LiuyaoError::lookup(format!("no native hexagram for palace {palace}")))
}
