//! DOCKET Catalog - Static Litigation Roadmap
//!
//! Read-only reference data: the stages and substages of the litigation
//! roadmap, their coin values, phase membership, and the transition
//! substages that promote a case from one phase to the next.
//!
//! Per-user completion state lives in docket-storage; this crate only
//! answers "what exists" questions, with `CatalogError` for unknown IDs.

mod roadmap;

pub use roadmap::default_roadmap;

use docket_core::{
    CatalogError, DocketError, DocketResult, Phase, Stage, StageId, Substage, SubstageId,
};
use serde::Serialize;
use std::collections::HashMap;

/// The static case catalog: an ordered list of stages with indexes for
/// substage lookup and phase transitions.
///
/// Serializable for handing the roadmap to the UI layer; built in process
/// via [`CatalogBuilder`], never deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    stages: Vec<Stage>,
    /// substage id -> (stage index, substage index)
    #[serde(skip)]
    substage_index: HashMap<SubstageId, (usize, usize)>,
    #[serde(skip)]
    stage_index: HashMap<StageId, usize>,
    /// Substage whose completion promotes the case into Litigation.
    litigation_transition: SubstageId,
    /// Substage whose completion promotes the case into Trial.
    trial_transition: SubstageId,
}

impl Catalog {
    /// Get a stage by ID.
    pub fn stage(&self, id: &StageId) -> DocketResult<&Stage> {
        self.stage_index
            .get(id)
            .map(|&i| &self.stages[i])
            .ok_or_else(|| DocketError::Catalog(CatalogError::StageNotFound { id: id.clone() }))
    }

    /// Get a substage by ID.
    pub fn substage(&self, id: &SubstageId) -> DocketResult<&Substage> {
        self.substage_index
            .get(id)
            .map(|&(si, ssi)| &self.stages[si].substages[ssi])
            .ok_or_else(|| {
                DocketError::Catalog(CatalogError::SubstageNotFound { id: id.clone() })
            })
    }

    /// Get the stage that owns a substage.
    pub fn stage_of_substage(&self, id: &SubstageId) -> DocketResult<&Stage> {
        self.substage_index
            .get(id)
            .map(|&(si, _)| &self.stages[si])
            .ok_or_else(|| {
                DocketError::Catalog(CatalogError::SubstageNotFound { id: id.clone() })
            })
    }

    /// All stages, in roadmap order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Stages belonging to a phase, in roadmap order.
    pub fn stages_in_phase(&self, phase: Phase) -> impl Iterator<Item = &Stage> {
        self.stages.iter().filter(move |s| s.phase == phase)
    }

    /// The substage whose completion promotes the case into `phase`.
    /// `PreLitigation` is the floor and has no transition.
    pub fn transition_substage(&self, phase: Phase) -> Option<&SubstageId> {
        match phase {
            Phase::PreLitigation => None,
            Phase::Litigation => Some(&self.litigation_transition),
            Phase::Trial => Some(&self.trial_transition),
        }
    }

    /// Total substage count across all stages.
    pub fn substage_count(&self) -> usize {
        self.substage_index.len()
    }
}

/// Builder for catalogs. Used by tests and by products that ship a custom
/// roadmap; panics on duplicate or dangling IDs since a malformed catalog
/// is a programming error, not a runtime condition.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    stages: Vec<Stage>,
    litigation_transition: Option<SubstageId>,
    trial_transition: Option<SubstageId>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn litigation_transition(mut self, id: impl Into<SubstageId>) -> Self {
        self.litigation_transition = Some(id.into());
        self
    }

    pub fn trial_transition(mut self, id: impl Into<SubstageId>) -> Self {
        self.trial_transition = Some(id.into());
        self
    }

    /// Build the catalog, indexing stages and substages.
    ///
    /// # Panics
    ///
    /// Panics if stage or substage IDs are duplicated, or if a transition
    /// substage does not exist in any stage.
    pub fn build(self) -> Catalog {
        let mut stage_index = HashMap::new();
        let mut substage_index = HashMap::new();

        for (si, stage) in self.stages.iter().enumerate() {
            if stage_index.insert(stage.id.clone(), si).is_some() {
                panic!("duplicate stage id: {}", stage.id);
            }
            for (ssi, substage) in stage.substages.iter().enumerate() {
                if substage_index
                    .insert(substage.id.clone(), (si, ssi))
                    .is_some()
                {
                    panic!("duplicate substage id: {}", substage.id);
                }
            }
        }

        let litigation_transition = self
            .litigation_transition
            .expect("litigation transition substage is required");
        let trial_transition = self
            .trial_transition
            .expect("trial transition substage is required");

        for transition in [&litigation_transition, &trial_transition] {
            assert!(
                substage_index.contains_key(transition),
                "transition substage {} not found in any stage",
                transition
            );
        }

        Catalog {
            stages: self.stages,
            substage_index,
            stage_index,
            litigation_transition,
            trial_transition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_core::SubstageKind;

    fn substage(id: &str, coins: u32) -> Substage {
        Substage {
            id: SubstageId::from(id),
            name: id.to_string(),
            description: None,
            coins,
            kind: SubstageKind::Simple,
        }
    }

    fn two_stage_catalog() -> Catalog {
        CatalogBuilder::new()
            .stage(Stage {
                id: StageId::from("demand"),
                name: "Demand Letter".to_string(),
                description: None,
                bonus_coins: 10,
                substages: vec![substage("dl-1", 20)],
                phase: Phase::PreLitigation,
            })
            .stage(Stage {
                id: StageId::from("complaint-filed"),
                name: "Complaint Filed".to_string(),
                description: None,
                bonus_coins: 25,
                substages: vec![substage("cf-1", 50), substage("cf-2", 50)],
                phase: Phase::Litigation,
            })
            .litigation_transition("cf-1")
            .trial_transition("cf-2")
            .build()
    }

    #[test]
    fn test_stage_lookup() {
        let catalog = two_stage_catalog();
        assert_eq!(
            catalog.stage(&StageId::from("demand")).unwrap().name,
            "Demand Letter"
        );
        assert!(matches!(
            catalog.stage(&StageId::from("nope")),
            Err(DocketError::Catalog(CatalogError::StageNotFound { .. }))
        ));
    }

    #[test]
    fn test_substage_lookup_and_owner() {
        let catalog = two_stage_catalog();
        assert_eq!(catalog.substage(&SubstageId::from("cf-2")).unwrap().coins, 50);
        assert_eq!(
            catalog
                .stage_of_substage(&SubstageId::from("cf-2"))
                .unwrap()
                .id,
            StageId::from("complaint-filed")
        );
        assert!(matches!(
            catalog.substage(&SubstageId::from("zz-9")),
            Err(DocketError::Catalog(CatalogError::SubstageNotFound { .. }))
        ));
    }

    #[test]
    fn test_stages_in_phase() {
        let catalog = two_stage_catalog();
        let pre: Vec<_> = catalog.stages_in_phase(Phase::PreLitigation).collect();
        assert_eq!(pre.len(), 1);
        assert_eq!(pre[0].id, StageId::from("demand"));
        assert_eq!(catalog.stages_in_phase(Phase::Trial).count(), 0);
    }

    #[test]
    fn test_transition_substages() {
        let catalog = two_stage_catalog();
        assert_eq!(catalog.transition_substage(Phase::PreLitigation), None);
        assert_eq!(
            catalog.transition_substage(Phase::Litigation),
            Some(&SubstageId::from("cf-1"))
        );
        assert_eq!(
            catalog.transition_substage(Phase::Trial),
            Some(&SubstageId::from("cf-2"))
        );
    }

    #[test]
    #[should_panic(expected = "duplicate substage id")]
    fn test_duplicate_substage_id_panics() {
        CatalogBuilder::new()
            .stage(Stage {
                id: StageId::from("a"),
                name: "A".to_string(),
                description: None,
                bonus_coins: 0,
                substages: vec![substage("x-1", 5), substage("x-1", 5)],
                phase: Phase::PreLitigation,
            })
            .litigation_transition("x-1")
            .trial_transition("x-1")
            .build();
    }

    #[test]
    #[should_panic(expected = "not found in any stage")]
    fn test_dangling_transition_panics() {
        CatalogBuilder::new()
            .stage(Stage {
                id: StageId::from("a"),
                name: "A".to_string(),
                description: None,
                bonus_coins: 0,
                substages: vec![substage("x-1", 5)],
                phase: Phase::PreLitigation,
            })
            .litigation_transition("x-1")
            .trial_transition("missing")
            .build();
    }
}
