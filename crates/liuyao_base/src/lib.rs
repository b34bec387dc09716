//! Closed tables and per-stage calculators for Liu-Yao hexagram charts.
//!
//! This crate provides:
//! - Stems, branches, elements, trigrams and the 64-hexagram palace table
//! - Hexagram building plus variant and mutual derivation
//! - Na-Jia, six kinships, hidden spirits and six gods driven by rule sets
//! - Season strength, chang-sheng stages, shen-sha, void branches and
//!   branch relations
//! - Coin and number casting helpers
//!
//! Every calculator is a pure function over its inputs. Tables follow the
//! classical Jing Fang eight-palace arrangement.

pub mod branch_relation;
pub mod casting;
pub mod changsheng;
pub mod element;
pub mod error;
pub mod ganzhi;
pub mod hexagram;
pub mod hexagram_data;
pub mod hidden_spirit;
pub mod kinship;
pub mod najia;
pub mod ruleset;
pub mod season;
pub mod shensha;
pub mod six_god;
pub mod transform;
pub mod trigram;
pub mod xunkong;

pub use branch_relation::{BranchRelation, branch_relations};
pub use casting::{NumberCast, cast_by_number, cast_random, line_from_coins, lines_from_coins};
pub use changsheng::{ALL_CHANGSHENG, ChangSheng, changsheng_stage, changsheng_table};
pub use element::{ALL_ELEMENTS, CycleRelation, Element};
pub use error::LiuyaoError;
pub use ganzhi::{ALL_BRANCHES, ALL_STEMS, Branch, Moment, Pillar, Polarity, Stem};
pub use hexagram::{
    Hexagram, HexagramCode, LINE_COUNT, Line, LineSpec, build_hexagram, hexagram_from_code,
};
pub use hexagram_data::{PalaceCategory, PalaceEntry, hexagram_name, native_entry, palace_entry};
pub use hidden_spirit::{HiddenSpirit, HiddenSpiritMode, resolve_hidden_spirits};
pub use kinship::{
    ALL_KINSHIPS, Kinship, anchor_element, classify_kinship, line_element, na_jia_elements,
    resolve_kinships,
};
pub use najia::{NaJiaLine, map_na_jia};
pub use ruleset::{
    DAY_BRANCH_KEY, JINGFANG_KEY, NaJiaRules, RuleSet, RuleSetRegistry, SixGodBasis, SixGodRules,
    StemAssignment, builtin_day_branch, builtin_jingfang,
};
pub use season::{SeasonStrength, season_element, season_status};
pub use shensha::{ShenSha, compute_shen_sha};
pub use six_god::{SIX_GOD_SEQUENCE, SixGod, assign_six_gods};
pub use transform::{derive_mutual, derive_variant};
pub use trigram::{ALL_TRIGRAMS, Trigram};
pub use xunkong::xun_kong;
