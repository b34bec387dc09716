//! Chart orchestration: lines + rule set + moment → fully annotated chart.
//!
//! Stages run leaf first: build, Na-Jia, kinship, hidden spirits, then the
//! order-free annotations (six gods, season strength, chang-sheng). The
//! variant is rebuilt from its own lines and charted against its own
//! palace. Nothing here holds state between calls.

use tracing::debug;

use liuyao_base::{
    Hexagram, LINE_COUNT, LiuyaoError, LineSpec, Moment, RuleSet, RuleSetRegistry,
    anchor_element, assign_six_gods, branch_relations, build_hexagram, changsheng_stage,
    compute_shen_sha, derive_mutual, derive_variant, map_na_jia, na_jia_elements,
    resolve_hidden_spirits, resolve_kinships, season_element, season_status, xun_kong,
};

use crate::chart_types::{
    ChartHexagram, ChartOptions, ComputationResult, EnrichedLine, LineBranchRelations,
};

/// Immutable registry plus options; safe to share across threads.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: RuleSetRegistry,
    options: ChartOptions,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(RuleSetRegistry::with_builtin(), ChartOptions::default())
    }
}

impl Engine {
    pub fn new(registry: RuleSetRegistry, options: ChartOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &RuleSetRegistry {
        &self.registry
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Chart six lines under the named rule set at `moment`.
    ///
    /// Line input is validated before the rule set is looked up, and the
    /// rule set before any table is read.
    pub fn compute_all(
        &self,
        lines: &[LineSpec],
        rule_set_key: &str,
        moment: &Moment,
    ) -> Result<ComputationResult, LiuyaoError> {
        if lines.len() != LINE_COUNT {
            return Err(LiuyaoError::InputValidation(format!(
                "need {LINE_COUNT} lines, got {}",
                lines.len()
            )));
        }
        let rules = self.registry.get(rule_set_key)?;
        let hex = build_hexagram(lines)?;

        let span = tracing::debug_span!("compute_all", rule_set = rule_set_key, code = %hex.code);
        let _guard = span.enter();
        debug!(name = hex.name, palace = %hex.palace, category = %hex.category, "hexagram built");

        let base = chart_hexagram(&hex, rules, moment, Some(&self.options))?;

        let variant_hex = derive_variant(&hex)?;
        debug!(name = variant_hex.name, moving = hex.moving_count(), "variant derived");
        let variant = chart_hexagram(&variant_hex, rules, moment, None)?;

        let mutual = if self.options.include_mutual {
            Some(derive_mutual(&hex)?)
        } else {
            None
        };

        let branch_relations = base
            .lines
            .iter()
            .filter_map(|l| {
                l.branch.map(|b| LineBranchRelations {
                    position: l.position,
                    to_day: branch_relations(b, moment.day.branch),
                    to_hour: branch_relations(b, moment.hour.branch),
                })
            })
            .collect();

        Ok(ComputationResult {
            rule_set: rules.key.clone(),
            moment: *moment,
            is_wandering_soul: hex.is_wandering_soul(),
            is_returning_soul: hex.is_returning_soul(),
            base,
            variant,
            mutual,
            shen_sha: compute_shen_sha(moment),
            void_branches: xun_kong(moment.day),
            branch_relations,
        })
    }
}

/// Enrich every line of `hex`. Six gods and hidden spirits are only placed
/// when `spirits` carries the engine options. Season strength rates the
/// line's stem element; chang-sheng looks up its branch under the day stem.
fn chart_hexagram(
    hex: &Hexagram,
    rules: &RuleSet,
    moment: &Moment,
    spirits: Option<&ChartOptions>,
) -> Result<ChartHexagram, LiuyaoError> {
    let na_jia = map_na_jia(hex, rules)?;
    let elements = na_jia_elements(&na_jia);
    let anchor = anchor_element(Some(hex.palace_element()), moment.day.stem);
    let relations = resolve_kinships(anchor, &elements);

    let (hidden, gods) = match spirits {
        Some(opts) => {
            let hidden = resolve_hidden_spirits(hex, &relations, rules, opts.hidden_spirit_mode)?;
            let placed = hidden.iter().flatten().count();
            if placed > 0 {
                debug!(placed, mode = ?opts.hidden_spirit_mode, "hidden spirits attached");
            }
            (hidden, Some(assign_six_gods(moment.day, &rules.six_god)))
        }
        None => ([None; LINE_COUNT], None),
    };

    let season = season_element(moment.month.branch);
    let lines = std::array::from_fn(|i| {
        let line = hex.lines[i];
        EnrichedLine {
            position: line.position,
            is_yang: line.is_yang,
            is_moving: line.is_moving,
            stem: Some(na_jia[i].stem),
            branch: Some(na_jia[i].branch),
            element: elements[i],
            relation: relations[i],
            six_god: gods.map(|g| g[i]),
            changsheng: Some(changsheng_stage(moment.day.stem, na_jia[i].branch)),
            season_strength: Some(season_status(season, na_jia[i].stem.element())),
            hidden_spirit: hidden[i],
            is_self: i == hex.self_index as usize,
            is_response: i == hex.response_index as usize,
        }
    });

    Ok(ChartHexagram {
        hexagram: hex.clone(),
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use liuyao_base::{Kinship, SeasonStrength, SixGod, Stem};

    fn moment() -> Moment {
        "甲辰 丙寅 甲子 甲子".parse().unwrap()
    }

    #[test]
    fn default_engine_has_builtins() {
        let e = Engine::default();
        assert!(e.registry().get("jingfang").is_ok());
        assert!(e.options().include_mutual);
    }

    #[test]
    fn line_count_checked_before_rule_set() {
        let e = Engine::default();
        let err = e.compute_all(&[LineSpec::yang(); 5], "missing", &moment()).unwrap_err();
        assert!(matches!(err, LiuyaoError::InputValidation(_)));
    }

    #[test]
    fn unknown_rule_set() {
        let e = Engine::default();
        let err = e.compute_all(&[LineSpec::yang(); 6], "missing", &moment()).unwrap_err();
        assert_eq!(err, LiuyaoError::RuleSetNotFound("missing".into()));
    }

    #[test]
    fn pure_heaven_chart() {
        let e = Engine::default();
        let r = e.compute_all(&[LineSpec::yang(); 6], "jingfang", &moment()).unwrap();
        let first = &r.base.lines[0];
        assert_eq!(first.stem, Some(Stem::Jia));
        assert_eq!(first.relation, Some(Kinship::Offspring));
        assert_eq!(first.six_god, Some(SixGod::AzureDragon));
        // 甲子 in a 寅 month: the stem's wood is in season even though 子 is water
        assert_eq!(first.season_strength, Some(SeasonStrength::Wang));
        assert_eq!(r.base.lines[3].season_strength, Some(SeasonStrength::Si));
        assert!(r.base.lines[5].is_self);
        assert!(r.base.lines[2].is_response);
        assert_eq!(r.variant.hexagram, r.base.hexagram);
        assert!(r.variant.lines.iter().all(|l| l.six_god.is_none()));
    }

    #[test]
    fn mutual_can_be_disabled() {
        let opts = ChartOptions {
            include_mutual: false,
            ..ChartOptions::default()
        };
        let e = Engine::new(RuleSetRegistry::with_builtin(), opts);
        let r = e.compute_all(&[LineSpec::yin(); 6], "jingfang", &moment()).unwrap();
        assert!(r.mutual.is_none());
    }

    #[test]
    fn engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }
}
