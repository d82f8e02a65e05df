//! DOCKET Engine - Case Progress & Reward Orchestration
//!
//! The completion engine drives all mutation of case state: substage and
//! stage completion, reversal, the daily login bonus, and coin-to-credit
//! conversion. It joins the static catalog with per-user storage and
//! publishes a domain event for every externally visible change.
//!
//! # Invariants
//!
//! - The ledger is the single source of truth for "has this unit of work
//!   ever paid out"; the progress store for "is it currently marked done".
//! - Coins are granted at most once per `(user, unit)` and are never
//!   reclaimed, not even by reversal.
//! - A completed flag is applied only after the ledger has answered
//!   (confirm-then-apply); a transient ledger failure leaves state
//!   unchanged and the call is safe to retry.

pub mod bonus;
pub mod phase;

pub use phase::{current_phase, phase_progress, stage_is_complete, PhaseProgress};

use chrono::Utc;
use docket_catalog::Catalog;
use docket_core::{
    CaseSnapshot, CatalogError, ClaimDate, CompletionOutcome, Conversion, DocketError,
    DocketResult, LedgerEntry, RewardConfig, Stage, StageId, StageSnapshot, SubstageId,
    SubstageKind, UnitId, UserId, Wallet, WalletError,
};
use docket_core::{FileRef, ProgressError};
use docket_events::{CaseEvent, CaseEventKind, EventSink};
use docket_storage::{ProgressStore, RewardLedger, WalletStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result of a daily bonus claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyClaim {
    pub streak: u32,
    pub coins_earned: u32,
}

/// The completion engine. Owns no state of its own; everything goes
/// through the injected stores so a server can back them with a database.
pub struct CaseEngine {
    catalog: Arc<Catalog>,
    progress: Arc<dyn ProgressStore>,
    ledger: Arc<dyn RewardLedger>,
    wallets: Arc<dyn WalletStore>,
    events: Arc<dyn EventSink>,
    config: RewardConfig,
}

impl CaseEngine {
    /// Create an engine. Fails if the reward configuration is invalid.
    pub fn new(
        catalog: Arc<Catalog>,
        progress: Arc<dyn ProgressStore>,
        ledger: Arc<dyn RewardLedger>,
        wallets: Arc<dyn WalletStore>,
        events: Arc<dyn EventSink>,
        config: RewardConfig,
    ) -> DocketResult<Self> {
        config.validate()?;
        Ok(Self {
            catalog,
            progress,
            ledger,
            wallets,
            events,
            config,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    // ========================================================================
    // CASE LIFECYCLE
    // ========================================================================

    /// Create the progress record and wallet for a new case. Idempotent.
    pub fn start_case(&self, user_id: UserId) -> DocketResult<()> {
        self.progress.init_case(user_id)?;
        self.wallets.create_wallet(user_id)?;
        Ok(())
    }

    // ========================================================================
    // COMPLETION / REVERSAL
    // ========================================================================

    /// Complete one substage, awarding its coins at most once, and cascade
    /// the stage bonus if this was the stage's last open substage.
    ///
    /// Replays are not errors: completing an already-complete substage
    /// returns `newly_completed = false` with zero coins so the UI can
    /// suppress celebratory feedback.
    pub fn complete_substage(
        &self,
        user_id: &UserId,
        stage_id: &StageId,
        substage_id: &SubstageId,
    ) -> DocketResult<CompletionOutcome> {
        let stage = self.catalog.stage(stage_id)?;
        let substage = self.catalog.substage(substage_id)?;
        if stage.substage(substage_id).is_none() {
            return Err(DocketError::Catalog(CatalogError::SubstageNotInStage {
                stage_id: stage_id.clone(),
                substage_id: substage_id.clone(),
            }));
        }

        let phase_before = self.derived_phase(user_id)?;
        let prior = self.progress.substage_progress(user_id, substage_id)?;
        let newly_completed = !prior.completed;

        // Ledger first: the flag is driven by the authoritative response,
        // never applied speculatively.
        let unit = UnitId::Substage(substage_id.clone());
        let award = self.ledger.try_award(user_id, unit.clone(), substage.coins)?;
        self.progress
            .set_substage_completed(user_id, substage_id, true)?;

        if award.granted {
            tracing::info!(
                user = %user_id,
                unit = %unit,
                coins = award.coins_granted,
                "substage coins awarded"
            );
        } else {
            tracing::debug!(user = %user_id, unit = %unit, "substage already paid out");
        }

        let mut coins_earned = award.coins_granted;

        if newly_completed {
            self.emit(
                *user_id,
                CaseEventKind::SubstageCompleted {
                    unit_id: unit,
                    coins_earned: award.coins_granted,
                },
            );
        }

        let stage_auto_completed = self.cascade_stage_bonus(user_id, stage, &mut coins_earned)?;
        self.emit_phase_change(user_id, phase_before)?;

        Ok(CompletionOutcome {
            coins_earned,
            stage_auto_completed,
            newly_completed,
        })
    }

    /// Mark an entire stage complete: every incomplete substage plus the
    /// stage bonus, once. The net effect equals completing each substage
    /// individually - no double counting. This is also the only path that
    /// completes a stage with zero substages.
    pub fn complete_stage(
        &self,
        user_id: &UserId,
        stage_id: &StageId,
    ) -> DocketResult<CompletionOutcome> {
        let stage = self.catalog.stage(stage_id)?;
        let phase_before = self.derived_phase(user_id)?;

        let mut coins_earned = 0u32;
        let mut newly_completed = false;

        if stage.is_empty() {
            let was_complete = self.progress.stage_completed_flag(user_id, stage_id)?;
            let unit = UnitId::Stage(stage_id.clone());
            let award = self.ledger.try_award(user_id, unit.clone(), stage.bonus_coins)?;
            self.progress.set_stage_completed(user_id, stage_id, true)?;
            coins_earned += award.coins_granted;
            if !was_complete {
                newly_completed = true;
                self.emit(
                    *user_id,
                    CaseEventKind::StageCompleted {
                        unit_id: unit,
                        coins_earned: award.coins_granted,
                    },
                );
            }
            self.emit_phase_change(user_id, phase_before)?;
            return Ok(CompletionOutcome {
                coins_earned,
                stage_auto_completed: newly_completed,
                newly_completed,
            });
        }

        for substage in &stage.substages {
            let prior = self.progress.substage_progress(user_id, &substage.id)?;
            if prior.completed {
                continue;
            }
            let unit = UnitId::Substage(substage.id.clone());
            let award = self.ledger.try_award(user_id, unit.clone(), substage.coins)?;
            self.progress
                .set_substage_completed(user_id, &substage.id, true)?;
            newly_completed = true;
            coins_earned += award.coins_granted;
            self.emit(
                *user_id,
                CaseEventKind::SubstageCompleted {
                    unit_id: unit,
                    coins_earned: award.coins_granted,
                },
            );
        }

        let stage_auto_completed = self.cascade_stage_bonus(user_id, stage, &mut coins_earned)?;
        self.emit_phase_change(user_id, phase_before)?;

        Ok(CompletionOutcome {
            coins_earned,
            stage_auto_completed,
            newly_completed,
        })
    }

    /// Revert a stage: the stage and all its substages go back to
    /// incomplete, and substage content (entered data, uploaded file
    /// references) is cleared - a revert is a full content reset.
    ///
    /// The ledger and wallet are untouched: coins already granted are
    /// permanent, which is what makes farm-and-revert pointless.
    pub fn revert_stage(&self, user_id: &UserId, stage_id: &StageId) -> DocketResult<()> {
        let stage = self.catalog.stage(stage_id)?;
        let phase_before = self.derived_phase(user_id)?;

        for substage in &stage.substages {
            self.progress
                .set_substage_completed(user_id, &substage.id, false)?;
            self.progress.clear_substage_content(user_id, &substage.id)?;
        }
        self.progress.set_stage_completed(user_id, stage_id, false)?;

        tracing::info!(user = %user_id, stage = %stage_id, "stage reverted");
        self.emit(
            *user_id,
            CaseEventKind::StageReverted {
                unit_id: UnitId::Stage(stage_id.clone()),
            },
        );
        self.emit_phase_change(user_id, phase_before)?;
        Ok(())
    }

    /// Award the stage bonus if every substage is now complete and the
    /// stage was not already marked complete. The marker flag makes the
    /// bonus fire once per completion cycle; the ledger makes the coins
    /// pay out once ever.
    fn cascade_stage_bonus(
        &self,
        user_id: &UserId,
        stage: &Stage,
        coins_earned: &mut u32,
    ) -> DocketResult<bool> {
        if stage.is_empty() {
            return Ok(false);
        }
        let completed = self.progress.completed_substages(user_id)?;
        if !stage.substage_ids().all(|id| completed.contains(id)) {
            return Ok(false);
        }
        if self.progress.stage_completed_flag(user_id, &stage.id)? {
            return Ok(false);
        }

        let unit = UnitId::Stage(stage.id.clone());
        let award = self.ledger.try_award(user_id, unit.clone(), stage.bonus_coins)?;
        self.progress.set_stage_completed(user_id, &stage.id, true)?;
        *coins_earned += award.coins_granted;

        if award.granted {
            tracing::info!(
                user = %user_id,
                stage = %stage.id,
                coins = award.coins_granted,
                "stage completion bonus awarded"
            );
        }
        self.emit(
            *user_id,
            CaseEventKind::StageCompleted {
                unit_id: unit,
                coins_earned: award.coins_granted,
            },
        );
        Ok(true)
    }

    // ========================================================================
    // SUBSTAGE CONTENT
    // ========================================================================

    /// Store user-entered data on a `DataEntryRequired` substage.
    pub fn enter_data(
        &self,
        user_id: &UserId,
        substage_id: &SubstageId,
        value: String,
    ) -> DocketResult<()> {
        let substage = self.catalog.substage(substage_id)?;
        if substage.kind != SubstageKind::DataEntryRequired {
            return Err(DocketError::Progress(ProgressError::DataEntryNotSupported {
                substage_id: substage_id.clone(),
                kind: substage.kind,
            }));
        }
        self.progress.set_entered_data(user_id, substage_id, value)
    }

    /// Attach an upload service file reference to an `UploadRequired`
    /// substage. Completion is not gated on a reference being present.
    pub fn attach_upload(
        &self,
        user_id: &UserId,
        substage_id: &SubstageId,
        file_ref: FileRef,
    ) -> DocketResult<()> {
        let substage = self.catalog.substage(substage_id)?;
        if substage.kind != SubstageKind::UploadRequired {
            return Err(DocketError::Progress(ProgressError::UploadNotSupported {
                substage_id: substage_id.clone(),
                kind: substage.kind,
            }));
        }
        self.progress
            .append_uploaded_file(user_id, substage_id, file_ref)
    }

    /// UI-state only: expand or collapse a stage in the roadmap view.
    pub fn set_stage_expanded(
        &self,
        user_id: &UserId,
        stage_id: &StageId,
        expanded: bool,
    ) -> DocketResult<()> {
        self.catalog.stage(stage_id)?;
        self.progress.set_stage_expanded(user_id, stage_id, expanded)
    }

    // ========================================================================
    // BONUSES & CONVERSION
    // ========================================================================

    /// Claim the daily login bonus for `today`. Consecutive days extend
    /// the streak; a gap resets it to 1; a second claim on the same date
    /// fails with `AlreadyClaimedToday`.
    pub fn claim_daily_bonus(&self, user_id: &UserId, today: ClaimDate) -> DocketResult<DailyClaim> {
        let wallet = self.wallets.wallet(user_id)?;
        if wallet.last_claim_date == Some(today) {
            return Err(DocketError::Wallet(WalletError::AlreadyClaimedToday {
                date: today,
            }));
        }

        let streak = match wallet.last_claim_date {
            Some(prev) if prev.succ_opt() == Some(today) => wallet.login_streak + 1,
            _ => 1,
        };
        let coins = bonus::daily_bonus(&self.config, streak);

        self.wallets.record_claim(user_id, today, streak)?;
        self.wallets.credit(user_id, coins as u64)?;

        tracing::info!(user = %user_id, streak, coins, "daily bonus claimed");
        self.emit(
            *user_id,
            CaseEventKind::DailyBonusClaimed {
                streak,
                coins_earned: coins,
            },
        );
        Ok(DailyClaim {
            streak,
            coins_earned: coins,
        })
    }

    /// Convert the wallet's coins to credits at the fixed rate, capped.
    /// Debits exactly the converted amount; the sub-credit remainder stays
    /// in the wallet.
    pub fn convert_coins(&self, user_id: &UserId) -> DocketResult<Conversion> {
        let wallet = self.wallets.wallet(user_id)?;
        let credits = bonus::credits_from_coins(&self.config, wallet.coin_balance);
        if credits == 0 {
            return Err(DocketError::Wallet(WalletError::InsufficientBalance {
                balance: wallet.coin_balance,
                required: self.config.coins_per_credit,
            }));
        }

        let debit = bonus::coins_needed_for_credits(&self.config, credits);
        let updated = self.wallets.debit(user_id, debit)?;

        tracing::info!(user = %user_id, credits, coins = debit, "coins converted to credits");
        self.emit(
            *user_id,
            CaseEventKind::CoinsConverted {
                credits,
                coins_debited: debit,
            },
        );
        Ok(Conversion {
            credits_granted: credits,
            coins_debited: debit,
            remaining_balance: updated.coin_balance,
        })
    }

    // ========================================================================
    // READ ACCESSORS
    // ========================================================================

    /// The user's wallet.
    pub fn wallet(&self, user_id: &UserId) -> DocketResult<Wallet> {
        self.wallets.wallet(user_id)
    }

    /// The user's full award history, oldest first.
    pub fn ledger_history(&self, user_id: &UserId) -> DocketResult<Vec<LedgerEntry>> {
        self.ledger.entries_for_user(user_id)
    }

    /// The derived phase, recomputed from current completion state.
    pub fn derived_phase(&self, user_id: &UserId) -> DocketResult<docket_core::Phase> {
        let completed = self.progress.completed_substages(user_id)?;
        Ok(phase::current_phase(&self.catalog, &completed))
    }

    /// Progress through the current phase's stages.
    pub fn derived_phase_progress(&self, user_id: &UserId) -> DocketResult<PhaseProgress> {
        let completed_substages = self.progress.completed_substages(user_id)?;
        let completed_stages = self.progress.completed_stages(user_id)?;
        Ok(phase::phase_progress(
            &self.catalog,
            &completed_substages,
            &completed_stages,
        ))
    }

    /// One stage joined with the user's progress. Stage completion is
    /// derived from substage state, except for zero-substage stages.
    pub fn stage_snapshot(
        &self,
        user_id: &UserId,
        stage_id: &StageId,
    ) -> DocketResult<StageSnapshot> {
        let stage = self.catalog.stage(stage_id)?;
        let completed_substages = self.progress.completed_substages(user_id)?;
        let completed_stages = self.progress.completed_stages(user_id)?;

        let mut substage_progress = Vec::with_capacity(stage.substages.len());
        for substage in &stage.substages {
            substage_progress.push((
                substage.id.clone(),
                self.progress.substage_progress(user_id, &substage.id)?,
            ));
        }

        Ok(StageSnapshot {
            completed: phase::stage_is_complete(stage, &completed_substages, &completed_stages),
            expanded: self.progress.stage_expanded(user_id, stage_id)?,
            stage: stage.clone(),
            substage_progress,
        })
    }

    /// The whole case: every stage snapshot, the derived phase, and the
    /// coin balance.
    pub fn case_snapshot(&self, user_id: &UserId) -> DocketResult<CaseSnapshot> {
        let mut stages = Vec::with_capacity(self.catalog.stages().len());
        for stage in self.catalog.stages() {
            stages.push(self.stage_snapshot(user_id, &stage.id)?);
        }
        Ok(CaseSnapshot {
            user_id: *user_id,
            phase: self.derived_phase(user_id)?,
            stages,
            coin_balance: self.wallets.wallet(user_id)?.coin_balance,
        })
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    fn emit(&self, user_id: UserId, kind: CaseEventKind) {
        self.events.publish(CaseEvent::new(user_id, Utc::now(), kind));
    }

    fn emit_phase_change(
        &self,
        user_id: &UserId,
        phase_before: docket_core::Phase,
    ) -> DocketResult<()> {
        let phase_after = self.derived_phase(user_id)?;
        if phase_after != phase_before {
            tracing::info!(
                user = %user_id,
                from = %phase_before,
                to = %phase_after,
                "case phase changed"
            );
            self.emit(
                *user_id,
                CaseEventKind::PhaseChanged {
                    from: phase_before,
                    to: phase_after,
                },
            );
        }
        Ok(())
    }
}
