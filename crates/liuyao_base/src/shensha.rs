//! Shen-sha: auxiliary stars keyed off the casting moment.
//!
//! Triad stars (peach blossom, traveling horse, general star, canopy) come
//! from the day branch's triad; scholar, prosperity and nobleman from the
//! day stem; heavenly doctor from the month branch; lonely and widow stars
//! from the year branch's season group.

use serde::{Deserialize, Serialize};

use crate::ganzhi::{Branch, Moment, Stem};

/// The four three-harmony triads, each listed birth, peak, tomb.
pub const TRIADS: [[Branch; 3]; 4] = [
    [Branch::Shen, Branch::Zi, Branch::Chen],
    [Branch::Yin, Branch::Wu, Branch::Xu],
    [Branch::Si, Branch::You, Branch::Chou],
    [Branch::Hai, Branch::Mao, Branch::Wei],
];

const PEACH_BLOSSOM: [Branch; 4] = [Branch::You, Branch::Mao, Branch::Wu, Branch::Zi];
const TRAVELING_HORSE: [Branch; 4] = [Branch::Yin, Branch::Shen, Branch::Hai, Branch::Si];

/// Index into [`TRIADS`] of the triad holding `b`.
pub fn triad_index(b: Branch) -> usize {
    // Triad members are four apart, so the index mod 4 picks the triad.
    match b.index() % 4 {
        0 => 0,
        2 => 1,
        1 => 2,
        _ => 3,
    }
}

/// Auxiliary stars of one casting moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShenSha {
    /// 桃花
    pub peach_blossom: Branch,
    /// 驿马
    pub traveling_horse: Branch,
    /// 文昌
    pub scholar: Branch,
    /// 禄神
    pub prosperity: Branch,
    /// 天乙贵人
    pub nobleman: [Branch; 2],
    /// 将星
    pub general_star: Branch,
    /// 华盖
    pub canopy: Branch,
    /// 天医
    pub heavenly_doctor: Branch,
    /// 孤辰
    pub lonely_star: Branch,
    /// 寡宿
    pub widow_star: Branch,
}

pub const fn scholar_star(day: Stem) -> Branch {
    match day {
        Stem::Jia => Branch::Si,
        Stem::Yi => Branch::Wu,
        Stem::Bing | Stem::Wu => Branch::Shen,
        Stem::Ding | Stem::Ji => Branch::You,
        Stem::Geng => Branch::Hai,
        Stem::Xin => Branch::Zi,
        Stem::Ren => Branch::Yin,
        Stem::Gui => Branch::Mao,
    }
}

pub const fn prosperity_star(day: Stem) -> Branch {
    match day {
        Stem::Jia => Branch::Yin,
        Stem::Yi => Branch::Mao,
        Stem::Bing | Stem::Wu => Branch::Si,
        Stem::Ding | Stem::Ji => Branch::Wu,
        Stem::Geng => Branch::Shen,
        Stem::Xin => Branch::You,
        Stem::Ren => Branch::Hai,
        Stem::Gui => Branch::Zi,
    }
}

pub const fn nobleman(day: Stem) -> [Branch; 2] {
    match day {
        Stem::Jia | Stem::Wu | Stem::Geng => [Branch::Chou, Branch::Wei],
        Stem::Yi | Stem::Ji => [Branch::Zi, Branch::Shen],
        Stem::Bing | Stem::Ding => [Branch::Hai, Branch::You],
        Stem::Xin => [Branch::Yin, Branch::Wu],
        Stem::Ren | Stem::Gui => [Branch::Mao, Branch::Si],
    }
}

/// 孤辰 and 寡宿 for a year branch.
pub const fn lonely_and_widow(year: Branch) -> (Branch, Branch) {
    match year {
        Branch::Hai | Branch::Zi | Branch::Chou => (Branch::Yin, Branch::Xu),
        Branch::Yin | Branch::Mao | Branch::Chen => (Branch::Si, Branch::Chou),
        Branch::Si | Branch::Wu | Branch::Wei => (Branch::Shen, Branch::Chen),
        Branch::Shen | Branch::You | Branch::Xu => (Branch::Hai, Branch::Wei),
    }
}

/// Every star for `moment`.
pub fn compute_shen_sha(moment: &Moment) -> ShenSha {
    let day = moment.day;
    let t = triad_index(day.branch);
    let (lonely_star, widow_star) = lonely_and_widow(moment.year.branch);
    ShenSha {
        peach_blossom: PEACH_BLOSSOM[t],
        traveling_horse: TRAVELING_HORSE[t],
        scholar: scholar_star(day.stem),
        prosperity: prosperity_star(day.stem),
        nobleman: nobleman(day.stem),
        general_star: TRIADS[t][1],
        canopy: TRIADS[t][2],
        heavenly_doctor: moment.month.branch.offset(-1),
        lonely_star,
        widow_star,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ganzhi::ALL_BRANCHES;

    #[test]
    fn triad_index_matches_table() {
        for b in ALL_BRANCHES {
            assert!(TRIADS[triad_index(b)].contains(&b), "{b}");
        }
    }

    #[test]
    fn jia_zi_day() {
        let m: Moment = "甲辰 丙寅 甲子 甲子".parse().unwrap();
        let s = compute_shen_sha(&m);
        assert_eq!(s.peach_blossom, Branch::You);
        assert_eq!(s.traveling_horse, Branch::Yin);
        assert_eq!(s.scholar, Branch::Si);
        assert_eq!(s.prosperity, Branch::Yin);
        assert_eq!(s.nobleman, [Branch::Chou, Branch::Wei]);
        assert_eq!(s.general_star, Branch::Zi);
        assert_eq!(s.canopy, Branch::Chen);
        assert_eq!(s.heavenly_doctor, Branch::Chou);
        assert_eq!((s.lonely_star, s.widow_star), (Branch::Si, Branch::Chou));
    }

    #[test]
    fn horse_clashes_triad_birth() {
        for (t, triad) in TRIADS.iter().enumerate() {
            assert_eq!(TRAVELING_HORSE[t], triad[0].offset(6));
        }
    }

    #[test]
    fn prosperity_is_linguan() {
        use crate::changsheng::{ChangSheng, changsheng_stage};
        for s in crate::ganzhi::ALL_STEMS {
            assert_eq!(changsheng_stage(s, prosperity_star(s)), ChangSheng::Linguan, "{s}");
        }
    }
}
