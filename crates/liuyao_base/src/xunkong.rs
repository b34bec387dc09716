//! Void branches (xun kong) of a pillar's ten-day cycle.

use crate::ganzhi::{Branch, Pillar};

/// Branch that opens the pillar's ten-day cycle (paired with 甲).
pub const fn xun_start(p: Pillar) -> Branch {
    p.branch.offset(-(p.stem.index() as i32))
}

/// The two branches the ten-day cycle of `p` leaves unpaired.
pub const fn xun_kong(p: Pillar) -> [Branch; 2] {
    let start = xun_start(p);
    [start.offset(-2), start.offset(-1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ganzhi::Stem;

    fn p(s: &str) -> Pillar {
        s.parse().unwrap()
    }

    #[test]
    fn jia_zi_xun() {
        assert_eq!(xun_kong(p("甲子")), [Branch::Xu, Branch::Hai]);
        assert_eq!(xun_kong(p("癸酉")), [Branch::Xu, Branch::Hai]);
    }

    #[test]
    fn jia_yin_xun() {
        assert_eq!(xun_start(p("丁巳")), Branch::Yin);
        assert_eq!(xun_kong(p("丁巳")), [Branch::Zi, Branch::Chou]);
    }

    #[test]
    fn whole_cycle_has_six_voids() {
        let mut voids = Vec::new();
        for i in 0..60u8 {
            let pillar = Pillar::new(Stem::from_index(i), Branch::from_index(i)).unwrap();
            let v = xun_kong(pillar);
            assert!(!voids.contains(&v) || voids.last() == Some(&v));
            if voids.last() != Some(&v) {
                voids.push(v);
            }
        }
        assert_eq!(voids.len(), 6);
    }
}
