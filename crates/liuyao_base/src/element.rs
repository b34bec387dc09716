//! Five elements (wu xing) and their generate/overcome cycle.
//!
//! Generation runs Wood → Fire → Earth → Metal → Water → Wood.
//! Overcoming skips one step: Wood → Earth → Water → Fire → Metal → Wood.
//! Every ordered pair of elements therefore falls in exactly one of five
//! cycle relations, which is what kinship and season strength classify.

use serde::{Deserialize, Serialize};

use crate::error::LiuyaoError;

/// The five elements in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// All five elements in generation order (index 0 = Wood).
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

/// Relation of one element to another, seen from the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CycleRelation {
    /// Both are the same element.
    Same,
    /// The first generates the second.
    Generates,
    /// The first overcomes the second.
    Overcomes,
    /// The second overcomes the first.
    OvercomeBy,
    /// The second generates the first.
    GeneratedBy,
}

impl Element {
    /// Chinese glyph.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "木",
            Self::Fire => "火",
            Self::Earth => "土",
            Self::Metal => "金",
            Self::Water => "水",
        }
    }

    /// 0-based index in generation order.
    pub const fn index(self) -> u8 {
        match self {
            Self::Wood => 0,
            Self::Fire => 1,
            Self::Earth => 2,
            Self::Metal => 3,
            Self::Water => 4,
        }
    }

    /// The element this one generates.
    pub const fn generates(self) -> Element {
        ALL_ELEMENTS[((self.index() + 1) % 5) as usize]
    }

    /// The element this one overcomes.
    pub const fn overcomes(self) -> Element {
        ALL_ELEMENTS[((self.index() + 2) % 5) as usize]
    }

    /// Number of generation steps from `self` to `other` (0..=4).
    pub const fn generation_steps(self, other: Element) -> u8 {
        (other.index() + 5 - self.index()) % 5
    }

    /// Classify `other` relative to `self`.
    pub const fn cycle_relation(self, other: Element) -> CycleRelation {
        match self.generation_steps(other) {
            0 => CycleRelation::Same,
            1 => CycleRelation::Generates,
            2 => CycleRelation::Overcomes,
            3 => CycleRelation::OvercomeBy,
            _ => CycleRelation::GeneratedBy,
        }
    }
}

impl std::str::FromStr for Element {
    type Err = LiuyaoError;

    /// Parse the glyph (`"木"`) or the English name (`"wood"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        ALL_ELEMENTS
            .iter()
            .copied()
            .find(|e| e.name() == t || format!("{e:?}").eq_ignore_ascii_case(t))
            .ok_or_else(|| LiuyaoError::input(format!("unknown element: {s:?}")))
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_glyph_and_name() {
        assert_eq!("金".parse::<Element>().unwrap(), Element::Metal);
        assert_eq!("water".parse::<Element>().unwrap(), Element::Water);
        assert!("aether".parse::<Element>().is_err());
    }

    #[test]
    fn generation_cycle() {
        assert_eq!(Element::Wood.generates(), Element::Fire);
        assert_eq!(Element::Fire.generates(), Element::Earth);
        assert_eq!(Element::Earth.generates(), Element::Metal);
        assert_eq!(Element::Metal.generates(), Element::Water);
        assert_eq!(Element::Water.generates(), Element::Wood);
    }

    #[test]
    fn overcoming_cycle() {
        assert_eq!(Element::Wood.overcomes(), Element::Earth);
        assert_eq!(Element::Earth.overcomes(), Element::Water);
        assert_eq!(Element::Water.overcomes(), Element::Fire);
        assert_eq!(Element::Fire.overcomes(), Element::Metal);
        assert_eq!(Element::Metal.overcomes(), Element::Wood);
    }

    #[test]
    fn overcoming_is_two_generation_steps() {
        for e in ALL_ELEMENTS {
            assert_eq!(e.overcomes(), e.generates().generates());
        }
    }

    #[test]
    fn cycle_relation_covers_every_pair_once() {
        for a in ALL_ELEMENTS {
            let mut seen = Vec::new();
            for b in ALL_ELEMENTS {
                let r = a.cycle_relation(b);
                assert!(!seen.contains(&r), "{a:?}->{b:?} duplicated {r:?}");
                seen.push(r);
            }
            assert_eq!(seen.len(), 5);
        }
    }

    #[test]
    fn cycle_relation_samples() {
        assert_eq!(Element::Metal.cycle_relation(Element::Water), CycleRelation::Generates);
        assert_eq!(Element::Metal.cycle_relation(Element::Wood), CycleRelation::Overcomes);
        assert_eq!(Element::Metal.cycle_relation(Element::Fire), CycleRelation::OvercomeBy);
        assert_eq!(Element::Metal.cycle_relation(Element::Earth), CycleRelation::GeneratedBy);
    }
}
