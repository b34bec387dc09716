//! Twelve life-cycle stages (chang sheng) of a branch relative to a stem.
//!
//! Yang stems start at their birth branch and walk forward; yin stems
//! start at their partner's 死 branch and walk backward. Earth shares
//! fire's cycle.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LiuyaoError;
use crate::ganzhi::{Branch, Polarity, Stem};

/// The twelve stages, birth first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChangSheng {
    Changsheng,
    Muyu,
    Guandai,
    Linguan,
    Diwang,
    Shuai,
    Bing,
    Si,
    Mu,
    Jue,
    Tai,
    Yang,
}

pub const ALL_CHANGSHENG: [ChangSheng; 12] = [
    ChangSheng::Changsheng,
    ChangSheng::Muyu,
    ChangSheng::Guandai,
    ChangSheng::Linguan,
    ChangSheng::Diwang,
    ChangSheng::Shuai,
    ChangSheng::Bing,
    ChangSheng::Si,
    ChangSheng::Mu,
    ChangSheng::Jue,
    ChangSheng::Tai,
    ChangSheng::Yang,
];

impl ChangSheng {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Changsheng => "长生",
            Self::Muyu => "沐浴",
            Self::Guandai => "冠带",
            Self::Linguan => "临官",
            Self::Diwang => "帝旺",
            Self::Shuai => "衰",
            Self::Bing => "病",
            Self::Si => "死",
            Self::Mu => "墓",
            Self::Jue => "绝",
            Self::Tai => "胎",
            Self::Yang => "养",
        }
    }

    pub const fn index(self) -> u8 {
        match self {
            Self::Changsheng => 0,
            Self::Muyu => 1,
            Self::Guandai => 2,
            Self::Linguan => 3,
            Self::Diwang => 4,
            Self::Shuai => 5,
            Self::Bing => 6,
            Self::Si => 7,
            Self::Mu => 8,
            Self::Jue => 9,
            Self::Tai => 10,
            Self::Yang => 11,
        }
    }
}

impl FromStr for ChangSheng {
    type Err = LiuyaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        ALL_CHANGSHENG
            .iter()
            .copied()
            .find(|c| c.name() == t || format!("{c:?}").eq_ignore_ascii_case(t))
            .ok_or_else(|| LiuyaoError::input(format!("unknown chang-sheng stage: {s:?}")))
    }
}

impl std::fmt::Display for ChangSheng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Branch of the 长生 stage for `stem`.
pub const fn birth_branch(stem: Stem) -> Branch {
    match stem {
        Stem::Jia => Branch::Hai,
        Stem::Yi => Branch::Wu,
        Stem::Bing | Stem::Wu => Branch::Yin,
        Stem::Ding | Stem::Ji => Branch::You,
        Stem::Geng => Branch::Si,
        Stem::Xin => Branch::Zi,
        Stem::Ren => Branch::Shen,
        Stem::Gui => Branch::Mao,
    }
}

const fn direction(stem: Stem) -> i32 {
    match stem.polarity() {
        Polarity::Yang => 1,
        Polarity::Yin => -1,
    }
}

/// Branch of every stage for `stem`, in stage order.
pub fn changsheng_table(stem: Stem) -> [Branch; 12] {
    let start = birth_branch(stem);
    let dir = direction(stem);
    std::array::from_fn(|i| start.offset(dir * i as i32))
}

/// Stage of `branch` in `stem`'s cycle.
pub const fn changsheng_stage(stem: Stem, branch: Branch) -> ChangSheng {
    let diff = branch.index() as i32 - birth_branch(stem).index() as i32;
    let steps = (diff * direction(stem)).rem_euclid(12);
    ALL_CHANGSHENG[steps as usize]
}
