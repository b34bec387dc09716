//! Na-Jia: stem and branch assignment per line.
//!
//! Each half of the hexagram reads its own trigram's entries from the rule
//! set. The lower half takes branches 0..3 of the lower trigram's cycle,
//! the upper half takes branches 3..6 of the upper trigram's cycle.

use serde::{Deserialize, Serialize};

use crate::error::LiuyaoError;
use crate::ganzhi::{Branch, Stem};
use crate::hexagram::{Hexagram, LINE_COUNT};
use crate::ruleset::RuleSet;

/// Stem and branch placed on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NaJiaLine {
    pub stem: Stem,
    pub branch: Branch,
}

/// Assign a stem and branch to every line of `hex`, bottom to top.
///
/// Fails with `InternalLookup` when the rule set has no stem entry for one
/// of the two trigrams; validated rule sets always do.
pub fn map_na_jia(hex: &Hexagram, rules: &RuleSet) -> Result<[NaJiaLine; LINE_COUNT], LiuyaoError> {
    let nj = &rules.na_jia;
    let lower_stems = nj.stems_for(hex.lower, false).ok_or_else(|| {
        LiuyaoError::lookup(format!("{}: no stems for {}", rules.key, hex.lower.name()))
    })?;
    let upper_stems = nj.stems_for(hex.upper, true).ok_or_else(|| {
        LiuyaoError::lookup(format!("{}: no stems for {}", rules.key, hex.upper.name()))
    })?;
    let lower_branches = nj.branches_for(hex.lower);
    let upper_branches = nj.branches_for(hex.upper);

    Ok(std::array::from_fn(|i| {
        if i < 3 {
            NaJiaLine {
                stem: lower_stems.stem_at(i),
                branch: lower_branches[i],
            }
        } else {
            NaJiaLine {
                stem: upper_stems.stem_at(i - 3),
                branch: upper_branches[i % 6],
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hexagram::{HexagramCode, hexagram_from_code};
    use crate::ruleset::{StemAssignment, builtin_jingfang};
    use crate::trigram::Trigram;

    fn chart(code: &str) -> [NaJiaLine; 6] {
        let hex = hexagram_from_code(code.parse::<HexagramCode>().unwrap()).unwrap();
        map_na_jia(&hex, &builtin_jingfang()).unwrap()
    }

    fn render(lines: &[NaJiaLine; 6]) -> String {
        lines.iter().map(|l| format!("{}{}", l.stem, l.branch)).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn pure_heaven() {
        assert_eq!(render(&chart("111111")), "甲子 甲寅 甲辰 壬午 壬申 壬戌");
    }

    #[test]
    fn pure_earth() {
        assert_eq!(render(&chart("000000")), "乙未 乙巳 乙卯 癸丑 癸亥 癸酉");
    }

    #[test]
    fn upper_half_reads_own_sequence() {
        // 水火既济: lower Li, upper Kan
        assert_eq!(render(&chart("101010")), "己卯 己丑 己亥 戊申 戊戌 戊子");
    }

    #[test]
    fn triple_assignment_is_positional() {
        let mut rs = builtin_jingfang();
        rs.na_jia
            .trigram_stems
            .insert(Trigram::Zhen, StemAssignment::Triple([Stem::Jia, Stem::Bing, Stem::Wu]));
        // 雷天大壮 puts Zhen on top
        let hex = hexagram_from_code("111100".parse().unwrap()).unwrap();
        let nj = map_na_jia(&hex, &rs).unwrap();
        assert_eq!(nj[3].stem, Stem::Jia);
        assert_eq!(nj[4].stem, Stem::Bing);
        assert_eq!(nj[5].stem, Stem::Wu);
    }

    #[test]
    fn missing_stem_entry_is_lookup_error() {
        let mut rs = builtin_jingfang();
        rs.na_jia.trigram_stems.remove(&Trigram::Kun);
        rs.na_jia.outer_stems.remove(&Trigram::Kun);
        let hex = hexagram_from_code("000000".parse().unwrap()).unwrap();
        assert!(matches!(map_na_jia(&hex, &rs), Err(LiuyaoError::InternalLookup(_))));
    }
}
