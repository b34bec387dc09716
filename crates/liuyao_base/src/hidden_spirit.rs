//! Hidden spirits (fu shen): annotations drawn from the palace's native
//! hexagram at the same line position.
//!
//! The native hexagram is charted with the same rule set and the same
//! anchor element as the target. Annotations are additive; a line's own
//! stem and branch are never replaced.

use serde::{Deserialize, Serialize};

use crate::error::LiuyaoError;
use crate::ganzhi::{Branch, Stem};
use crate::hexagram::{Hexagram, HexagramCode, LINE_COUNT, hexagram_from_code};
use crate::hexagram_data::native_entry;
use crate::kinship::{Kinship, missing_kinships, na_jia_elements, resolve_kinships};
use crate::najia::map_na_jia;
use crate::ruleset::RuleSet;

/// Stem, branch and kinship of a native-hexagram line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HiddenSpirit {
    pub stem: Stem,
    pub branch: Branch,
    pub relation: Option<Kinship>,
}

/// Which target lines receive a hidden spirit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenSpiritMode {
    /// Lines whose own kinship could not be resolved.
    #[default]
    UnresolvedLines,
    /// Lines under which the native hexagram holds a kinship the target's
    /// visible lines lack.
    MissingKinship,
}

/// The palace's native hexagram charted line by line.
pub fn native_reference(
    hex: &Hexagram,
    rules: &RuleSet,
) -> Result<[HiddenSpirit; LINE_COUNT], LiuyaoError> {
    let entry = native_entry(hex.palace)?;
    let code = HexagramCode::new(entry.code)
        .ok_or_else(|| LiuyaoError::lookup(format!("native code {} out of range", entry.code)))?;
    let native = hexagram_from_code(code)?;
    let na_jia = map_na_jia(&native, rules)?;
    let relations = resolve_kinships(hex.palace_element(), &na_jia_elements(&na_jia));
    Ok(std::array::from_fn(|i| HiddenSpirit {
        stem: na_jia[i].stem,
        branch: na_jia[i].branch,
        relation: relations[i],
    }))
}

/// Place reference lines onto the target according to `mode`.
pub fn attach_hidden_spirits(
    relations: &[Option<Kinship>; LINE_COUNT],
    reference: &[HiddenSpirit; LINE_COUNT],
    mode: HiddenSpiritMode,
) -> [Option<HiddenSpirit>; LINE_COUNT] {
    match mode {
        HiddenSpiritMode::UnresolvedLines => {
            std::array::from_fn(|i| relations[i].is_none().then_some(reference[i]))
        }
        HiddenSpiritMode::MissingKinship => {
            let missing = missing_kinships(relations);
            std::array::from_fn(|i| {
                reference[i]
                    .relation
                    .filter(|k| missing.contains(k))
                    .map(|_| reference[i])
            })
        }
    }
}

/// Whether `mode` needs the native reference for these relations.
pub fn needs_hidden_spirits(relations: &[Option<Kinship>; LINE_COUNT], mode: HiddenSpiritMode) -> bool {
    match mode {
        HiddenSpiritMode::UnresolvedLines => relations.iter().any(Option::is_none),
        HiddenSpiritMode::MissingKinship => !missing_kinships(relations).is_empty(),
    }
}

/// Hidden spirits for `hex`. The native hexagram is only charted when at
/// least one line can receive an annotation.
pub fn resolve_hidden_spirits(
    hex: &Hexagram,
    relations: &[Option<Kinship>; LINE_COUNT],
    rules: &RuleSet,
    mode: HiddenSpiritMode,
) -> Result<[Option<HiddenSpirit>; LINE_COUNT], LiuyaoError> {
    if !needs_hidden_spirits(relations, mode) {
        return Ok([None; LINE_COUNT]);
    }
    let reference = native_reference(hex, rules)?;
    Ok(attach_hidden_spirits(relations, &reference, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruleset::builtin_jingfang;

    fn hex(code: &str) -> Hexagram {
        hexagram_from_code(code.parse().unwrap()).unwrap()
    }

    fn relations_of(h: &Hexagram) -> [Option<Kinship>; 6] {
        let nj = map_na_jia(h, &builtin_jingfang()).unwrap();
        resolve_kinships(h.palace_element(), &na_jia_elements(&nj))
    }

    #[test]
    fn native_reference_of_pure_heaven() {
        let h = hex("111111");
        let r = native_reference(&h, &builtin_jingfang()).unwrap();
        assert_eq!(r[0].branch, Branch::Zi);
        assert_eq!(r[0].relation, Some(Kinship::Offspring));
        assert_eq!(r[1].relation, Some(Kinship::Wealth));
        assert_eq!(r[3].stem, Stem::Ren);
        assert_eq!(r[3].relation, Some(Kinship::Officer));
    }

    #[test]
    fn fully_resolved_lines_get_nothing_in_default_mode() {
        let h = hex("011111");
        let rels = relations_of(&h);
        let hs = resolve_hidden_spirits(&h, &rels, &builtin_jingfang(), HiddenSpiritMode::default())
            .unwrap();
        assert!(hs.iter().all(Option::is_none));
    }

    #[test]
    fn unresolved_lines_take_same_position() {
        let h = hex("011111");
        let reference = native_reference(&h, &builtin_jingfang()).unwrap();
        let mut rels = relations_of(&h);
        rels[2] = None;
        rels[5] = None;
        let hs = attach_hidden_spirits(&rels, &reference, HiddenSpiritMode::UnresolvedLines);
        for i in 0..6 {
            if rels[i].is_none() {
                assert_eq!(hs[i], Some(reference[i]));
            } else {
                assert!(hs[i].is_none());
            }
        }
    }

    #[test]
    fn gou_hides_wealth_under_second_line() {
        // 天风姤 (Qian palace) shows no 妻财; Qian's 甲寅 sits under line 1.
        let h = hex("011111");
        let rels = relations_of(&h);
        assert!(!rels.contains(&Some(Kinship::Wealth)));
        let hs =
            resolve_hidden_spirits(&h, &rels, &builtin_jingfang(), HiddenSpiritMode::MissingKinship)
                .unwrap();
        let placed: Vec<usize> = (0..6).filter(|&i| hs[i].is_some()).collect();
        assert_eq!(placed, vec![1]);
        let spirit = hs[1].unwrap();
        assert_eq!((spirit.stem, spirit.branch), (Stem::Jia, Branch::Yin));
        assert_eq!(spirit.relation, Some(Kinship::Wealth));
    }

    #[test]
    fn native_hexagram_hides_nothing() {
        for code in ["111111", "000000", "010010", "101101"] {
            let h = hex(code);
            let rels = relations_of(&h);
            assert!(!needs_hidden_spirits(&rels, HiddenSpiritMode::MissingKinship), "{code}");
        }
    }
}
