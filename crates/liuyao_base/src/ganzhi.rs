//! Heavenly stems, earthly branches, sexagenary pillars and the moment.
//!
//! 10 stems and 12 branches, each with a fixed element and polarity.
//! A pillar pairs a stem with a branch of the same polarity (the 60
//! combinations of the sexagenary cycle). The moment is four pillars
//! (year, month, day, hour) resolved by an external calendar before any
//! chart computation starts.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::LiuyaoError;

/// Yin/yang polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Yang,
    Yin,
}

/// The 10 heavenly stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// All 10 stems in cycle order (index 0 = Jia).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

impl Stem {
    /// Chinese glyph.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Jia => "甲",
            Self::Yi => "乙",
            Self::Bing => "丙",
            Self::Ding => "丁",
            Self::Wu => "戊",
            Self::Ji => "己",
            Self::Geng => "庚",
            Self::Xin => "辛",
            Self::Ren => "壬",
            Self::Gui => "癸",
        }
    }

    /// Pinyin spelling without tone marks.
    pub const fn pinyin(self) -> &'static str {
        match self {
            Self::Jia => "jia",
            Self::Yi => "yi",
            Self::Bing => "bing",
            Self::Ding => "ding",
            Self::Wu => "wu",
            Self::Ji => "ji",
            Self::Geng => "geng",
            Self::Xin => "xin",
            Self::Ren => "ren",
            Self::Gui => "gui",
        }
    }

    /// 0-based index (Jia=0 .. Gui=9).
    pub const fn index(self) -> u8 {
        match self {
            Self::Jia => 0,
            Self::Yi => 1,
            Self::Bing => 2,
            Self::Ding => 3,
            Self::Wu => 4,
            Self::Ji => 5,
            Self::Geng => 6,
            Self::Xin => 7,
            Self::Ren => 8,
            Self::Gui => 9,
        }
    }

    /// Stem at `idx` modulo 10.
    pub const fn from_index(idx: u8) -> Stem {
        ALL_STEMS[(idx % 10) as usize]
    }

    /// Element: two consecutive stems per element, starting at Wood.
    pub const fn element(self) -> Element {
        match self {
            Self::Jia | Self::Yi => Element::Wood,
            Self::Bing | Self::Ding => Element::Fire,
            Self::Wu | Self::Ji => Element::Earth,
            Self::Geng | Self::Xin => Element::Metal,
            Self::Ren | Self::Gui => Element::Water,
        }
    }

    /// Even-indexed stems are yang.
    pub const fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }
}

/// The 12 earthly branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All 12 branches in cycle order (index 0 = Zi).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

impl Branch {
    /// Chinese glyph.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zi => "子",
            Self::Chou => "丑",
            Self::Yin => "寅",
            Self::Mao => "卯",
            Self::Chen => "辰",
            Self::Si => "巳",
            Self::Wu => "午",
            Self::Wei => "未",
            Self::Shen => "申",
            Self::You => "酉",
            Self::Xu => "戌",
            Self::Hai => "亥",
        }
    }

    /// Pinyin spelling without tone marks.
    pub const fn pinyin(self) -> &'static str {
        match self {
            Self::Zi => "zi",
            Self::Chou => "chou",
            Self::Yin => "yin",
            Self::Mao => "mao",
            Self::Chen => "chen",
            Self::Si => "si",
            Self::Wu => "wu",
            Self::Wei => "wei",
            Self::Shen => "shen",
            Self::You => "you",
            Self::Xu => "xu",
            Self::Hai => "hai",
        }
    }

    /// 0-based index (Zi=0 .. Hai=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Zi => 0,
            Self::Chou => 1,
            Self::Yin => 2,
            Self::Mao => 3,
            Self::Chen => 4,
            Self::Si => 5,
            Self::Wu => 6,
            Self::Wei => 7,
            Self::Shen => 8,
            Self::You => 9,
            Self::Xu => 10,
            Self::Hai => 11,
        }
    }

    /// Branch at `idx` modulo 12.
    pub const fn from_index(idx: u8) -> Branch {
        ALL_BRANCHES[(idx % 12) as usize]
    }

    /// Branch `steps` positions forward (negative = backward) on the cycle.
    pub const fn offset(self, steps: i32) -> Branch {
        let idx = (self.index() as i32 + steps).rem_euclid(12);
        ALL_BRANCHES[idx as usize]
    }

    /// Element. The four "transitional" branches (Chou, Chen, Wei, Xu) are Earth.
    pub const fn element(self) -> Element {
        match self {
            Self::Yin | Self::Mao => Element::Wood,
            Self::Si | Self::Wu => Element::Fire,
            Self::Shen | Self::You => Element::Metal,
            Self::Hai | Self::Zi => Element::Water,
            Self::Chou | Self::Chen | Self::Wei | Self::Xu => Element::Earth,
        }
    }

    /// Even-indexed branches are yang.
    pub const fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }
}

fn parse_token<T: Copy>(
    s: &str,
    all: &[T],
    name: fn(T) -> &'static str,
    pinyin: fn(T) -> &'static str,
    what: &str,
) -> Result<T, LiuyaoError> {
    let t = s.trim();
    all.iter()
        .copied()
        .find(|&v| name(v) == t || pinyin(v).eq_ignore_ascii_case(t))
        .ok_or_else(|| LiuyaoError::input(format!("unknown {what}: {s:?}")))
}

impl FromStr for Stem {
    type Err = LiuyaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_token(s, &ALL_STEMS, Stem::name, Stem::pinyin, "stem")
    }
}

impl FromStr for Branch {
    type Err = LiuyaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_token(s, &ALL_BRANCHES, Branch::name, Branch::pinyin, "branch")
    }
}

impl Display for Stem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A stem-branch pair from the sexagenary cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    /// Pair a stem with a branch. Only same-polarity pairs occur in the
    /// sexagenary cycle; anything else is rejected.
    pub fn new(stem: Stem, branch: Branch) -> Result<Self, LiuyaoError> {
        if stem.polarity() != branch.polarity() {
            return Err(LiuyaoError::input(format!(
                "{stem}{branch} is not a sexagenary pair"
            )));
        }
        Ok(Self { stem, branch })
    }

    /// Position in the 60-cycle (甲子 = 0 .. 癸亥 = 59).
    pub const fn cycle_index(self) -> u8 {
        // i ≡ stem (mod 10) and i ≡ branch (mod 12)
        let i = 6 * self.stem.index() as i32 - 5 * self.branch.index() as i32;
        i.rem_euclid(60) as u8
    }
}

impl FromStr for Pillar {
    type Err = LiuyaoError;

    /// Parse `"甲子"` or `"jia-zi"` / `"jia zi"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(a), Some(b), None) = (chars.next(), chars.next(), chars.next()) {
            if !a.is_ascii() && !b.is_ascii() {
                return Pillar::new(a.to_string().parse()?, b.to_string().parse()?);
            }
        }
        let mut parts = t.split(|c: char| c == '-' || c.is_whitespace()).filter(|p| !p.is_empty());
        match (parts.next(), parts.next(), parts.next()) {
            (Some(stem), Some(branch), None) => Pillar::new(stem.parse()?, branch.parse()?),
            _ => Err(LiuyaoError::input(format!("malformed pillar: {s:?}"))),
        }
    }
}

impl Display for Pillar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

/// Year, month, day and hour pillars of a casting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Moment {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl Moment {
    pub fn new(year: Pillar, month: Pillar, day: Pillar, hour: Pillar) -> Self {
        Self {
            year,
            month,
            day,
            hour,
        }
    }
}

impl FromStr for Moment {
    type Err = LiuyaoError;

    /// Parse four whitespace-separated glyph pillars: `"甲辰 丙寅 甲子 甲子"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pillars: Vec<&str> = s.split_whitespace().collect();
        if pillars.len() != 4 {
            return Err(LiuyaoError::input(format!(
                "moment needs 4 pillars (year month day hour), got {}",
                pillars.len()
            )));
        }
        Ok(Self::new(
            pillars[0].parse()?,
            pillars[1].parse()?,
            pillars[2].parse()?,
            pillars[3].parse()?,
        ))
    }
}
