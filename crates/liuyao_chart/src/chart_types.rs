//! Types for chart orchestration: options, enriched lines and the
//! aggregate result.

use serde::Serialize;

use liuyao_base::{
    Branch, BranchRelation, ChangSheng, Element, Hexagram, HiddenSpirit, HiddenSpiritMode,
    Kinship, LINE_COUNT, Moment, SeasonStrength, ShenSha, SixGod, Stem,
};

/// Engine-level switches fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    /// Which lines receive hidden spirits.
    pub hidden_spirit_mode: HiddenSpiritMode,
    /// Derive the mutual hexagram.
    pub include_mutual: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            hidden_spirit_mode: HiddenSpiritMode::UnresolvedLines,
            include_mutual: true,
        }
    }
}

/// One line with every annotation the chart carries.
///
/// Annotations are `None` when the stage did not run for this hexagram
/// (six gods and hidden spirits on the variant) or could not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnrichedLine {
    /// 0-based, bottom to top.
    pub position: u8,
    pub is_yang: bool,
    pub is_moving: bool,
    pub stem: Option<Stem>,
    pub branch: Option<Branch>,
    pub element: Option<Element>,
    pub relation: Option<Kinship>,
    pub six_god: Option<SixGod>,
    pub changsheng: Option<ChangSheng>,
    /// Vigor of the stem's element in the month.
    pub season_strength: Option<SeasonStrength>,
    pub hidden_spirit: Option<HiddenSpirit>,
    /// 世
    pub is_self: bool,
    /// 应
    pub is_response: bool,
}

/// A hexagram with its enriched lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartHexagram {
    pub hexagram: Hexagram,
    pub lines: [EnrichedLine; LINE_COUNT],
}

impl ChartHexagram {
    pub fn self_line(&self) -> &EnrichedLine {
        &self.lines[self.hexagram.self_index as usize]
    }

    pub fn response_line(&self) -> &EnrichedLine {
        &self.lines[self.hexagram.response_index as usize]
    }
}

/// Relations of one base line's branch to the day and hour branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineBranchRelations {
    pub position: u8,
    pub to_day: Vec<BranchRelation>,
    pub to_hour: Vec<BranchRelation>,
}

/// Everything one call to `compute_all` produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComputationResult {
    /// Key of the rule set used.
    pub rule_set: String,
    pub moment: Moment,
    pub base: ChartHexagram,
    /// Rebuilt from the flipped lines; no six gods or hidden spirits.
    pub variant: ChartHexagram,
    pub mutual: Option<Hexagram>,
    pub shen_sha: ShenSha,
    /// Void branches of the day pillar.
    pub void_branches: [Branch; 2],
    pub is_wandering_soul: bool,
    pub is_returning_soul: bool,
    pub branch_relations: Vec<LineBranchRelations>,
}

impl ComputationResult {
    /// Whether any base line moves.
    pub fn has_moving_lines(&self) -> bool {
        self.base.lines.iter().any(|l| l.is_moving)
    }

    /// Positions of base lines whose branch is void on the casting day.
    pub fn void_positions(&self) -> Vec<u8> {
        self.base
            .lines
            .iter()
            .filter(|l| l.branch.is_some_and(|b| self.void_branches.contains(&b)))
            .map(|l| l.position)
            .collect()
    }
}
