//! Phase classification: deriving the coarse case status from the set of
//! completed substages.
//!
//! The phase is recomputed from current state on every read. There is no
//! stored phase field, so reverting a transition substage demotes the phase
//! on the next read.

use docket_catalog::Catalog;
use docket_core::{Phase, StageId, SubstageId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Progress within the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseProgress {
    pub phase: Phase,
    /// Stages of the current phase that are derived-complete.
    pub stages_complete: u32,
    /// Total stage count of the current phase.
    pub stages_total: u32,
    /// 0-100, rounded to the nearest integer.
    pub percent: u8,
}

/// Derive the current phase from the completed substage set.
///
/// Checked highest phase first: Trial implies Litigation was already
/// passed, so the Trial transition takes precedence and there are no
/// ambiguous states.
pub fn current_phase(catalog: &Catalog, completed: &BTreeSet<SubstageId>) -> Phase {
    for phase in [Phase::Trial, Phase::Litigation] {
        if let Some(transition) = catalog.transition_substage(phase) {
            if completed.contains(transition) {
                return phase;
            }
        }
    }
    Phase::PreLitigation
}

/// Whether a stage is derived-complete given the completed sets.
///
/// Stages with substages are complete iff all their substages are; stages
/// without substages carry an explicit flag, reported via `completed_stages`.
pub fn stage_is_complete(
    stage: &docket_core::Stage,
    completed_substages: &BTreeSet<SubstageId>,
    completed_stages: &BTreeSet<StageId>,
) -> bool {
    if stage.is_empty() {
        completed_stages.contains(&stage.id)
    } else {
        stage
            .substage_ids()
            .all(|id| completed_substages.contains(id))
    }
}

/// Report progress through the current phase's stages.
pub fn phase_progress(
    catalog: &Catalog,
    completed_substages: &BTreeSet<SubstageId>,
    completed_stages: &BTreeSet<StageId>,
) -> PhaseProgress {
    let phase = current_phase(catalog, completed_substages);

    let mut total = 0u32;
    let mut complete = 0u32;
    for stage in catalog.stages_in_phase(phase) {
        total += 1;
        if stage_is_complete(stage, completed_substages, completed_stages) {
            complete += 1;
        }
    }

    let percent = if total == 0 {
        0
    } else {
        ((complete as f64 / total as f64) * 100.0).round() as u8
    };

    PhaseProgress {
        phase,
        stages_complete: complete,
        stages_total: total,
        percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_catalog::default_roadmap;

    fn set(ids: &[&str]) -> BTreeSet<SubstageId> {
        ids.iter().map(|s| SubstageId::from(*s)).collect()
    }

    #[test]
    fn test_empty_set_is_pre_litigation() {
        let catalog = default_roadmap();
        assert_eq!(current_phase(catalog, &set(&[])), Phase::PreLitigation);
    }

    #[test]
    fn test_litigation_transition_promotes() {
        let catalog = default_roadmap();
        assert_eq!(current_phase(catalog, &set(&["cf-2"])), Phase::Litigation);
    }

    #[test]
    fn test_trial_takes_precedence_over_litigation() {
        let catalog = default_roadmap();
        // Trial transition alone, without the Litigation transition, still
        // classifies as Trial: the highest phase wins.
        assert_eq!(current_phase(catalog, &set(&["pt-2"])), Phase::Trial);
        assert_eq!(
            current_phase(catalog, &set(&["cf-2", "pt-2"])),
            Phase::Trial
        );
    }

    #[test]
    fn test_non_transition_substages_do_not_promote() {
        let catalog = default_roadmap();
        assert_eq!(
            current_phase(catalog, &set(&["cf-1", "ds-1", "tr-1"])),
            Phase::PreLitigation
        );
    }

    #[test]
    fn test_phase_progress_counts_stages() {
        let catalog = default_roadmap();
        // Pre-litigation has two stages: intake (in-1, in-2) and demand
        // (dm-1, dm-2). Complete intake only.
        let progress = phase_progress(catalog, &set(&["in-1", "in-2"]), &BTreeSet::new());
        assert_eq!(progress.phase, Phase::PreLitigation);
        assert_eq!(progress.stages_complete, 1);
        assert_eq!(progress.stages_total, 2);
        assert_eq!(progress.percent, 50);
    }

    #[test]
    fn test_phase_progress_rounds_to_nearest() {
        let catalog = default_roadmap();
        // Litigation has three stages; one complete is 33.33 -> 33.
        let progress = phase_progress(
            catalog,
            &set(&["cf-1", "cf-2"]),
            &BTreeSet::new(),
        );
        assert_eq!(progress.phase, Phase::Litigation);
        assert_eq!(progress.stages_complete, 1);
        assert_eq!(progress.stages_total, 3);
        assert_eq!(progress.percent, 33);
    }

    #[test]
    fn test_partial_stage_is_not_complete() {
        let catalog = default_roadmap();
        let progress = phase_progress(catalog, &set(&["in-1"]), &BTreeSet::new());
        assert_eq!(progress.stages_complete, 0);
    }
}
