//! Season strength (wang xiang xiu qiu si) of an element in a given month.

use serde::{Deserialize, Serialize};

use crate::element::{CycleRelation, Element};
use crate::error::LiuyaoError;
use crate::ganzhi::Branch;

/// Five-tier seasonal vigor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeasonStrength {
    /// 旺
    Wang,
    /// 相
    Xiang,
    /// 休
    Xiu,
    /// 囚
    Qiu,
    /// 死
    Si,
}

pub const ALL_SEASON_STRENGTHS: [SeasonStrength; 5] = [
    SeasonStrength::Wang,
    SeasonStrength::Xiang,
    SeasonStrength::Xiu,
    SeasonStrength::Qiu,
    SeasonStrength::Si,
];

impl SeasonStrength {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wang => "旺",
            Self::Xiang => "相",
            Self::Xiu => "休",
            Self::Qiu => "囚",
            Self::Si => "死",
        }
    }

    pub const fn index(self) -> u8 {
        match self {
            Self::Wang => 0,
            Self::Xiang => 1,
            Self::Xiu => 2,
            Self::Qiu => 3,
            Self::Si => 4,
        }
    }
}

impl std::str::FromStr for SeasonStrength {
    type Err = LiuyaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        ALL_SEASON_STRENGTHS
            .iter()
            .copied()
            .find(|v| v.name() == t || format!("{v:?}").eq_ignore_ascii_case(t))
            .ok_or_else(|| LiuyaoError::input(format!("unknown season strength: {s:?}")))
    }
}

impl std::fmt::Display for SeasonStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ruling element of the month. 辰戌丑未 close their seasons and rule earth.
pub const fn season_element(month: Branch) -> Element {
    match month {
        Branch::Yin | Branch::Mao => Element::Wood,
        Branch::Si | Branch::Wu => Element::Fire,
        Branch::Shen | Branch::You => Element::Metal,
        Branch::Hai | Branch::Zi => Element::Water,
        Branch::Chen | Branch::Xu | Branch::Chou | Branch::Wei => Element::Earth,
    }
}

/// Vigor of `line` under a season ruled by `season`.
///
/// Tests apply in order: same, season generates, two generation hops,
/// season overcomes, two overcoming hops, otherwise 休. Two generation hops
/// and one overcoming hop name the same element, so the earlier test
/// claims it and 囚 is never returned.
pub const fn season_status(season: Element, line: Element) -> SeasonStrength {
    match season.cycle_relation(line) {
        CycleRelation::Same => SeasonStrength::Wang,
        CycleRelation::Generates => SeasonStrength::Xiang,
        CycleRelation::Overcomes => SeasonStrength::Xiu,
        // four generation hops = two overcoming hops
        CycleRelation::GeneratedBy => SeasonStrength::Si,
        CycleRelation::OvercomeBy => SeasonStrength::Xiu,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ALL_ELEMENTS;
    use crate::ganzhi::ALL_BRANCHES;

    #[test]
    fn month_grouping_matches_branch_element() {
        for b in ALL_BRANCHES {
            assert_eq!(season_element(b), b.element(), "{b}");
        }
    }

    #[test]
    fn wood_season() {
        let s = Element::Wood;
        assert_eq!(season_status(s, Element::Wood), SeasonStrength::Wang);
        assert_eq!(season_status(s, Element::Fire), SeasonStrength::Xiang);
        assert_eq!(season_status(s, Element::Earth), SeasonStrength::Xiu);
        assert_eq!(season_status(s, Element::Metal), SeasonStrength::Xiu);
        assert_eq!(season_status(s, Element::Water), SeasonStrength::Si);
    }

    #[test]
    fn parse_names() {
        assert_eq!("囚".parse::<SeasonStrength>().unwrap(), SeasonStrength::Qiu);
        assert_eq!("xiang".parse::<SeasonStrength>().unwrap(), SeasonStrength::Xiang);
    }

    #[test]
    fn qiu_never_produced() {
        for a in ALL_ELEMENTS {
            for b in ALL_ELEMENTS {
                assert_ne!(season_status(a, b), SeasonStrength::Qiu);
            }
        }
    }
}
