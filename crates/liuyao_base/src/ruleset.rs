//! Rule sets ("schools") and the registry that holds them.
//!
//! A rule set only feeds Na-Jia assignment and the six-god sequence; every
//! other calculator is school-independent. Rule sets are plain data and
//! can be loaded from JSON, so a new school needs no code change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::LiuyaoError;
use crate::ganzhi::{Branch, Stem};
use crate::six_god::{SIX_GOD_SEQUENCE, SixGod};
use crate::trigram::{ALL_TRIGRAMS, Trigram};

/// Key of the classical Jing Fang school.
pub const JINGFANG_KEY: &str = "jingfang";

/// Key of the day-branch six-god school.
pub const DAY_BRANCH_KEY: &str = "day-branch";

/// Stems given to the three lines of one trigram half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StemAssignment {
    /// One stem on all three lines.
    Single(Stem),
    /// One stem per line, bottom to top.
    Triple([Stem; 3]),
}

impl StemAssignment {
    /// Stem for line `i` (0..3) of the half.
    pub const fn stem_at(self, i: usize) -> Stem {
        match self {
            Self::Single(s) => s,
            Self::Triple(s) => s[i % 3],
        }
    }
}

/// Na-Jia tables of a school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaJiaRules {
    /// Stem assignment per trigram; must cover all eight.
    pub trigram_stems: BTreeMap<Trigram, StemAssignment>,
    /// Overrides for a trigram placed in the upper half.
    #[serde(default)]
    pub outer_stems: BTreeMap<Trigram, StemAssignment>,
    /// Six-branch cycle per trigram. Lower half reads 0..3, upper half 3..6.
    #[serde(default)]
    pub branch_sequences: BTreeMap<Trigram, [Branch; 6]>,
    /// Cycle for trigrams without their own sequence.
    pub default_branches: [Branch; 6],
}

impl NaJiaRules {
    /// Stem assignment of `trigram` in the lower or upper half.
    pub fn stems_for(&self, trigram: Trigram, upper: bool) -> Option<StemAssignment> {
        let outer = if upper { self.outer_stems.get(&trigram) } else { None };
        outer.or_else(|| self.trigram_stems.get(&trigram)).copied()
    }

    /// Branch cycle of `trigram`, falling back to the default cycle.
    pub fn branches_for(&self, trigram: Trigram) -> &[Branch; 6] {
        self.branch_sequences
            .get(&trigram)
            .unwrap_or(&self.default_branches)
    }
}

/// Which day component selects the first spirit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SixGodBasis {
    DayStem,
    DayBranch,
}

/// Six-god configuration of a school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SixGodRules {
    pub basis: SixGodBasis,
    #[serde(default)]
    pub start_by_stem: BTreeMap<Stem, SixGod>,
    #[serde(default)]
    pub start_by_branch: BTreeMap<Branch, SixGod>,
    /// Rotation order; six distinct spirits.
    pub sequence: [SixGod; 6],
}

/// A named interpretive school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Registry key.
    pub key: String,
    /// Human-readable name.
    pub name: String,
    pub na_jia: NaJiaRules,
    pub six_god: SixGodRules,
}

impl RuleSet {
    /// Parse and validate a rule set from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, LiuyaoError> {
        let rs: RuleSet = serde_json::from_str(json)?;
        rs.validate()?;
        Ok(rs)
    }

    /// Check the shape invariants the calculators rely on.
    pub fn validate(&self) -> Result<(), LiuyaoError> {
        if self.key.trim().is_empty() {
            return Err(LiuyaoError::RuleSetConfig("empty rule set key".into()));
        }
        if let Some(missing) = ALL_TRIGRAMS
            .iter()
            .find(|t| !self.na_jia.trigram_stems.contains_key(t))
        {
            return Err(LiuyaoError::RuleSetConfig(format!(
                "{}: no stem assignment for trigram {}",
                self.key,
                missing.name()
            )));
        }
        let mut seq = self.six_god.sequence.to_vec();
        seq.sort();
        seq.dedup();
        if seq.len() != 6 {
            return Err(LiuyaoError::RuleSetConfig(format!(
                "{}: six-god sequence repeats a spirit",
                self.key
            )));
        }
        Ok(())
    }
}

fn classical_na_jia() -> NaJiaRules {
    use Branch::*;
    use Stem::*;

    let trigram_stems = BTreeMap::from([
        (Trigram::Qian, StemAssignment::Single(Jia)),
        (Trigram::Kun, StemAssignment::Single(Yi)),
        (Trigram::Zhen, StemAssignment::Single(Geng)),
        (Trigram::Xun, StemAssignment::Single(Xin)),
        (Trigram::Kan, StemAssignment::Single(Stem::Wu)),
        (Trigram::Li, StemAssignment::Single(Ji)),
        (Trigram::Gen, StemAssignment::Single(Bing)),
        (Trigram::Dui, StemAssignment::Single(Ding)),
    ]);
    let outer_stems = BTreeMap::from([
        (Trigram::Qian, StemAssignment::Single(Ren)),
        (Trigram::Kun, StemAssignment::Single(Gui)),
    ]);
    // Yang trigrams advance through the yang branches, yin trigrams
    // retreat through the yin branches.
    let branch_sequences = BTreeMap::from([
        (Trigram::Qian, [Zi, Yin, Chen, Branch::Wu, Shen, Xu]),
        (Trigram::Zhen, [Zi, Yin, Chen, Branch::Wu, Shen, Xu]),
        (Trigram::Kan, [Yin, Chen, Branch::Wu, Shen, Xu, Zi]),
        (Trigram::Gen, [Chen, Branch::Wu, Shen, Xu, Zi, Yin]),
        (Trigram::Kun, [Wei, Si, Mao, Chou, Hai, You]),
        (Trigram::Xun, [Chou, Hai, You, Wei, Si, Mao]),
        (Trigram::Li, [Mao, Chou, Hai, You, Wei, Si]),
        (Trigram::Dui, [Si, Mao, Chou, Hai, You, Wei]),
    ]);

    NaJiaRules {
        trigram_stems,
        outer_stems,
        branch_sequences,
        default_branches: [Zi, Yin, Chen, Branch::Wu, Shen, Xu],
    }
}

/// Classical Jing Fang Na-Jia with six gods started from the day stem.
pub fn builtin_jingfang() -> RuleSet {
    use SixGod::*;
    use Stem::*;

    RuleSet {
        key: JINGFANG_KEY.to_string(),
        name: "京房纳甲".to_string(),
        na_jia: classical_na_jia(),
        six_god: SixGodRules {
            basis: SixGodBasis::DayStem,
            start_by_stem: BTreeMap::from([
                (Jia, AzureDragon),
                (Yi, AzureDragon),
                (Bing, VermilionBird),
                (Ding, VermilionBird),
                (Stem::Wu, HookedArray),
                (Ji, FlyingSerpent),
                (Geng, WhiteTiger),
                (Xin, WhiteTiger),
                (Ren, BlackTortoise),
                (Gui, BlackTortoise),
            ]),
            start_by_branch: BTreeMap::new(),
            sequence: SIX_GOD_SEQUENCE,
        },
    }
}

/// Jing Fang Na-Jia with six gods started from the day branch.
pub fn builtin_day_branch() -> RuleSet {
    use Branch::*;
    use SixGod::*;

    RuleSet {
        key: DAY_BRANCH_KEY.to_string(),
        name: "日支起六神".to_string(),
        na_jia: classical_na_jia(),
        six_god: SixGodRules {
            basis: SixGodBasis::DayBranch,
            start_by_stem: BTreeMap::new(),
            start_by_branch: BTreeMap::from([
                (Yin, AzureDragon),
                (Mao, AzureDragon),
                (Si, VermilionBird),
                (Branch::Wu, VermilionBird),
                (Chen, HookedArray),
                (Xu, HookedArray),
                (Chou, FlyingSerpent),
                (Wei, FlyingSerpent),
                (Shen, WhiteTiger),
                (You, WhiteTiger),
                (Hai, BlackTortoise),
                (Zi, BlackTortoise),
            ]),
            sequence: SIX_GOD_SEQUENCE,
        },
    }
}

/// Immutable-after-construction collection of rule sets keyed by name.
#[derive(Debug, Clone, Default)]
pub struct RuleSetRegistry {
    sets: BTreeMap<String, RuleSet>,
}

impl RuleSetRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in schools.
    pub fn with_builtin() -> Self {
        let mut reg = Self::new();
        reg.sets.insert(JINGFANG_KEY.to_string(), builtin_jingfang());
        reg.sets.insert(DAY_BRANCH_KEY.to_string(), builtin_day_branch());
        reg
    }

    /// Validate and add a rule set, replacing any set with the same key.
    pub fn insert(&mut self, rule_set: RuleSet) -> Result<(), LiuyaoError> {
        rule_set.validate()?;
        if let Some(old) = self.sets.insert(rule_set.key.clone(), rule_set) {
            tracing::warn!(key = %old.key, "rule set replaced");
        }
        Ok(())
    }

    /// Parse a JSON rule set and add it. Returns the registered key.
    pub fn load_json(&mut self, json: &str) -> Result<String, LiuyaoError> {
        let rs = RuleSet::from_json_str(json)?;
        let key = rs.key.clone();
        self.insert(rs)?;
        Ok(key)
    }

    /// Look up a rule set by key.
    pub fn get(&self, key: &str) -> Result<&RuleSet, LiuyaoError> {
        self.sets
            .get(key)
            .ok_or_else(|| LiuyaoError::RuleSetNotFound(key.to_string()))
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
