//! Six kinships (liu qin): each line's element classified against the
//! hexagram's anchor element.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::{CycleRelation, Element};
use crate::error::LiuyaoError;
use crate::ganzhi::{Branch, Stem};
use crate::hexagram::LINE_COUNT;
use crate::najia::NaJiaLine;

/// The five kinship categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kinship {
    /// 兄弟: same element as the anchor.
    Sibling,
    /// 子孙: generated by the anchor.
    Offspring,
    /// 妻财: overcome by the anchor.
    Wealth,
    /// 官鬼: overcomes the anchor.
    Officer,
    /// 父母: generates the anchor.
    Parent,
}

pub const ALL_KINSHIPS: [Kinship; 5] = [
    Kinship::Sibling,
    Kinship::Offspring,
    Kinship::Wealth,
    Kinship::Officer,
    Kinship::Parent,
];

impl Kinship {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sibling => "兄弟",
            Self::Offspring => "子孙",
            Self::Wealth => "妻财",
            Self::Officer => "官鬼",
            Self::Parent => "父母",
        }
    }

    pub const fn index(self) -> u8 {
        match self {
            Self::Sibling => 0,
            Self::Offspring => 1,
            Self::Wealth => 2,
            Self::Officer => 3,
            Self::Parent => 4,
        }
    }

    /// Kinship for a cycle relation seen from the anchor.
    pub const fn from_relation(rel: CycleRelation) -> Kinship {
        match rel {
            CycleRelation::Same => Self::Sibling,
            CycleRelation::Generates => Self::Offspring,
            CycleRelation::Overcomes => Self::Wealth,
            CycleRelation::OvercomeBy => Self::Officer,
            CycleRelation::GeneratedBy => Self::Parent,
        }
    }
}

impl FromStr for Kinship {
    type Err = LiuyaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        ALL_KINSHIPS
            .iter()
            .copied()
            .find(|k| k.name() == t || format!("{k:?}").eq_ignore_ascii_case(t))
            .ok_or_else(|| LiuyaoError::input(format!("unknown kinship: {s:?}")))
    }
}

impl std::fmt::Display for Kinship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify `line` against `anchor`.
pub const fn classify_kinship(anchor: Element, line: Element) -> Kinship {
    Kinship::from_relation(anchor.cycle_relation(line))
}

/// Element of a line: the branch's when placed, else the stem's.
pub fn line_element(branch: Option<Branch>, stem: Option<Stem>) -> Option<Element> {
    branch.map(Branch::element).or_else(|| stem.map(Stem::element))
}

/// Anchor element: the palace's when known, else the day stem's.
pub fn anchor_element(palace: Option<Element>, day_stem: Stem) -> Element {
    palace.unwrap_or_else(|| day_stem.element())
}

/// Kinship of every line against `anchor`. Lines without an element stay
/// unclassified.
pub fn resolve_kinships(
    anchor: Element,
    elements: &[Option<Element>; LINE_COUNT],
) -> [Option<Kinship>; LINE_COUNT] {
    elements.map(|e| e.map(|e| classify_kinship(anchor, e)))
}

/// Elements of Na-Jia placed lines.
pub fn na_jia_elements(lines: &[NaJiaLine; LINE_COUNT]) -> [Option<Element>; LINE_COUNT] {
    lines.map(|l| line_element(Some(l.branch), Some(l.stem)))
}

/// Kinships absent from `present`, in canonical order.
pub fn missing_kinships(present: &[Option<Kinship>]) -> Vec<Kinship> {
    ALL_KINSHIPS
        .iter()
        .copied()
        .filter(|k| !present.contains(&Some(*k)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metal_anchor() {
        assert_eq!(classify_kinship(Element::Metal, Element::Metal), Kinship::Sibling);
        assert_eq!(classify_kinship(Element::Metal, Element::Water), Kinship::Offspring);
        assert_eq!(classify_kinship(Element::Metal, Element::Wood), Kinship::Wealth);
        assert_eq!(classify_kinship(Element::Metal, Element::Fire), Kinship::Officer);
        assert_eq!(classify_kinship(Element::Metal, Element::Earth), Kinship::Parent);
    }

    #[test]
    fn branch_preferred_over_stem() {
        assert_eq!(line_element(Some(Branch::Zi), Some(Stem::Jia)), Some(Element::Water));
        assert_eq!(line_element(None, Some(Stem::Jia)), Some(Element::Wood));
        assert_eq!(line_element(None, None), None);
    }

    #[test]
    fn anchor_falls_back_to_day_stem() {
        assert_eq!(anchor_element(Some(Element::Earth), Stem::Jia), Element::Earth);
        assert_eq!(anchor_element(None, Stem::Bing), Element::Fire);
    }

    #[test]
    fn each_anchor_yields_all_five() {
        for anchor in crate::element::ALL_ELEMENTS {
            let mut ks: Vec<Kinship> = crate::element::ALL_ELEMENTS
                .iter()
                .map(|&e| classify_kinship(anchor, e))
                .collect();
            ks.sort();
            ks.dedup();
            assert_eq!(ks.len(), 5);
        }
    }

    #[test]
    fn unresolved_element_stays_unclassified() {
        let mut els = [Some(Element::Wood); 6];
        els[4] = None;
        let ks = resolve_kinships(Element::Metal, &els);
        assert_eq!(ks[0], Some(Kinship::Wealth));
        assert_eq!(ks[4], None);
    }

    #[test]
    fn missing_lists_absent_only() {
        let present = [Some(Kinship::Sibling), None, Some(Kinship::Parent)];
        assert_eq!(
            missing_kinships(&present),
            vec![Kinship::Offspring, Kinship::Wealth, Kinship::Officer]
        );
    }

    #[test]
    fn parse_names() {
        assert_eq!("官鬼".parse::<Kinship>().unwrap(), Kinship::Officer);
        assert!("nephew".parse::<Kinship>().is_err());
    }
}
