//! Six gods (liu shen): rotating spirit tags over the six lines.
//!
//! The starting spirit comes from the day stem or day branch, depending
//! on the rule set; the sequence then advances one spirit per line from
//! the bottom up.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LiuyaoError;
use crate::ganzhi::Pillar;
use crate::hexagram::LINE_COUNT;
use crate::ruleset::{SixGodBasis, SixGodRules};

/// The six spirits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SixGod {
    AzureDragon,
    VermilionBird,
    HookedArray,
    FlyingSerpent,
    WhiteTiger,
    BlackTortoise,
}

/// Canonical rotation starting from the Azure Dragon.
pub const SIX_GOD_SEQUENCE: [SixGod; 6] = [
    SixGod::AzureDragon,
    SixGod::VermilionBird,
    SixGod::HookedArray,
    SixGod::FlyingSerpent,
    SixGod::WhiteTiger,
    SixGod::BlackTortoise,
];

impl SixGod {
    /// Chinese name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::AzureDragon => "青龙",
            Self::VermilionBird => "朱雀",
            Self::HookedArray => "勾陈",
            Self::FlyingSerpent => "螣蛇",
            Self::WhiteTiger => "白虎",
            Self::BlackTortoise => "玄武",
        }
    }
}

impl FromStr for SixGod {
    type Err = LiuyaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        SIX_GOD_SEQUENCE
            .iter()
            .copied()
            .find(|g| g.name() == t || format!("{g:?}").eq_ignore_ascii_case(t))
            .ok_or_else(|| LiuyaoError::input(format!("unknown six god: {s:?}")))
    }
}

impl std::fmt::Display for SixGod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Index into `rules.sequence` where the bottom line starts.
///
/// Falls back to 0 when the day's stem/branch is unmapped or the mapped
/// spirit is absent from the sequence.
pub fn start_index(day: Pillar, rules: &SixGodRules) -> usize {
    let start = match rules.basis {
        SixGodBasis::DayStem => rules.start_by_stem.get(&day.stem),
        SixGodBasis::DayBranch => rules.start_by_branch.get(&day.branch),
    };
    start
        .and_then(|god| rules.sequence.iter().position(|g| g == god))
        .unwrap_or(0)
}

/// Spirit for each line, bottom to top.
pub fn assign_six_gods(day: Pillar, rules: &SixGodRules) -> [SixGod; LINE_COUNT] {
    let start = start_index(day, rules);
    let n = rules.sequence.len();
    std::array::from_fn(|i| rules.sequence[(start + i) % n])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ganzhi::{Branch, Stem};
    use crate::ruleset::builtin_jingfang;

    fn day(stem: Stem, branch: Branch) -> Pillar {
        Pillar::new(stem, branch).unwrap()
    }

    #[test]
    fn jia_day_starts_with_azure_dragon() {
        let rs = builtin_jingfang();
        let gods = assign_six_gods(day(Stem::Jia, Branch::Zi), &rs.six_god);
        assert_eq!(gods, SIX_GOD_SEQUENCE);
    }

    #[test]
    fn geng_day_starts_with_white_tiger_and_wraps() {
        let rs = builtin_jingfang();
        let gods = assign_six_gods(day(Stem::Geng, Branch::Wu), &rs.six_god);
        assert_eq!(
            gods,
            [
                SixGod::WhiteTiger,
                SixGod::BlackTortoise,
                SixGod::AzureDragon,
                SixGod::VermilionBird,
                SixGod::HookedArray,
                SixGod::FlyingSerpent,
            ]
        );
    }

    #[test]
    fn every_spirit_used_once() {
        let rs = builtin_jingfang();
        for stem in crate::ganzhi::ALL_STEMS {
            let branch = if stem.index() % 2 == 0 { Branch::Zi } else { Branch::Chou };
            let mut gods = assign_six_gods(day(stem, branch), &rs.six_god).to_vec();
            gods.sort();
            gods.dedup();
            assert_eq!(gods.len(), 6);
        }
    }

    #[test]
    fn unmapped_start_defaults_to_index_zero() {
        let mut rs = builtin_jingfang();
        rs.six_god.start_by_stem.clear();
        assert_eq!(start_index(day(Stem::Ren, Branch::Xu), &rs.six_god), 0);
    }

    #[test]
    fn parse_names() {
        assert_eq!("玄武".parse::<SixGod>().unwrap(), SixGod::BlackTortoise);
        assert_eq!("whitetiger".parse::<SixGod>().unwrap(), SixGod::WhiteTiger);
    }
}
