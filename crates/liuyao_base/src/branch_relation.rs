//! Relations between two earthly branches: harmony, clash, triad and
//! punishment.

use serde::{Deserialize, Serialize};

use crate::ganzhi::Branch;
use crate::shensha::triad_index;

/// Pairwise relations two branches can hold. Several may apply at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BranchRelation {
    /// 六合
    SixHarmony,
    /// 六冲
    SixClash,
    /// 三合: both in the same triad.
    TripleHarmony,
    /// 刑
    Punishment,
}

impl BranchRelation {
    pub const fn name(self) -> &'static str {
        match self {
            Self::SixHarmony => "六合",
            Self::SixClash => "六冲",
            Self::TripleHarmony => "三合",
            Self::Punishment => "刑",
        }
    }
}

impl std::fmt::Display for BranchRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Partner of `b` in the six harmonies. Pair indices sum to 1 mod 12.
pub const fn six_harmony_partner(b: Branch) -> Branch {
    Branch::from_index(((13 - b.index() as i32) % 12) as u8)
}

pub const fn six_clash_partner(b: Branch) -> Branch {
    b.offset(6)
}

pub fn is_triple_harmony(a: Branch, b: Branch) -> bool {
    a != b && triad_index(a) == triad_index(b)
}

/// Whether `a` punishes `b` or `b` punishes `a`.
pub fn is_punishment(a: Branch, b: Branch) -> bool {
    use Branch::*;
    const GROUPS: [&[Branch]; 3] = [&[Yin, Si, Shen], &[Chou, Xu, Wei], &[Zi, Mao]];
    const SELF: [Branch; 4] = [Chen, Wu, You, Hai];
    if a == b {
        return SELF.contains(&a);
    }
    GROUPS.iter().any(|g| g.contains(&a) && g.contains(&b))
}

/// Every relation `a` holds with `b`, in declaration order.
pub fn branch_relations(a: Branch, b: Branch) -> Vec<BranchRelation> {
    let mut out = Vec::new();
    if six_harmony_partner(a) == b {
        out.push(BranchRelation::SixHarmony);
    }
    if six_clash_partner(a) == b {
        out.push(BranchRelation::SixClash);
    }
    if is_triple_harmony(a, b) {
        out.push(BranchRelation::TripleHarmony);
    }
    if is_punishment(a, b) {
        out.push(BranchRelation::Punishment);
    }
    out
}
