//! The rebase ledger: checkpoint ordering over the rate registry, the accrual
//! clock and the principal-ledger collaborator.
//!
//! Every mutating operation follows the same shape:
//! 1. authorize the caller,
//! 2. plan every checkpoint and validate every amount without touching state,
//! 3. commit the checkpoints (credit owed interest, advance the clock, lock
//!    first-time rates), then apply the principal change,
//! 4. emit events.
//!
//! Step 2 covers everything that can fail, so a rejected call leaves no
//! partial state behind.

use crate::clock::AccrualClock;
use crate::error::AccrualError;
use crate::event::{EventBus, LedgerEvent};
use crate::projector::{self, AccrualSnapshot, CheckpointPlan};
use crate::registry::{GlobalRate, RateRegistry};
use accrue_store::{AccessControl, AccrualStore, PrincipalLedger, Role};
use accrue_types::{
    HolderAddress, HolderState, LedgerParams, Rate, Timestamp, TransferCheckpoint,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Amount sentinel for [`RebaseLedger::burn`] and [`RebaseLedger::transfer`]:
/// use the holder's whole balance as of the checkpoint.
pub const ALL: u128 = u128::MAX;

const GLOBAL_RATE_KEY: &[u8] = b"global_rate";

/// Persisted accrual state of one holder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderRecord {
    pub rate: Rate,
    pub last_update: Timestamp,
}

/// Interest-bearing ledger over an external principal ledger.
///
/// All state is owned by the instance; nothing is process-global, so any
/// number of independent ledgers can live side by side.
pub struct RebaseLedger<P, A> {
    params: LedgerParams,
    registry: RateRegistry,
    clock: AccrualClock,
    principal: P,
    access: A,
    events: EventBus,
}

impl<P: PrincipalLedger, A: AccessControl> RebaseLedger<P, A> {
    pub fn new(params: LedgerParams, principal: P, access: A) -> Self {
        let registry = RateRegistry::new(params.initial_rate, params.rate_policy);
        Self {
            params,
            registry,
            clock: AccrualClock::new(),
            principal,
            access,
            events: EventBus::new(),
        }
    }

    pub fn params(&self) -> &LedgerParams {
        &self.params
    }

    pub fn principal_ledger(&self) -> &P {
        &self.principal
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    // ── Rates ──────────────────────────────────────────────────────────

    /// Replace the global rate, subject to the configured direction policy.
    ///
    /// Holders who already have a locked rate are unaffected.
    pub fn set_global_rate(
        &mut self,
        caller: &HolderAddress,
        new_rate: Rate,
    ) -> Result<(), AccrualError> {
        self.authorize(caller, Role::RateSetter)?;
        let previous = self.registry.set_global_rate(new_rate).map_err(|e| {
            warn!(
                current = %self.registry.current_global_rate(),
                proposed = %new_rate,
                policy = %self.registry.policy(),
                "rejected global rate change"
            );
            e
        })?;
        let current = self.registry.global();
        info!(
            old = %previous.rate,
            new = %current.rate,
            version = current.version,
            "global rate changed"
        );
        self.events.emit(&LedgerEvent::GlobalRateChanged {
            old: previous.rate,
            new: current.rate,
            version: current.version,
        });
        Ok(())
    }

    pub fn current_global_rate(&self) -> Rate {
        self.registry.current_global_rate()
    }

    pub fn global_rate(&self) -> GlobalRate {
        self.registry.global()
    }

    /// The rate locked for `holder`, zero if they were never checkpointed.
    pub fn holder_rate_of(&self, holder: &HolderAddress) -> Rate {
        self.registry.holder_rate(holder)
    }

    // ── Clock ──────────────────────────────────────────────────────────

    pub fn last_update_of(&self, holder: &HolderAddress) -> Timestamp {
        self.clock.last_update(holder)
    }

    pub fn holder_state(&self, holder: &HolderAddress) -> HolderState {
        if self.clock.is_tracked(holder) {
            HolderState::Active
        } else {
            HolderState::Uninitialized
        }
    }

    // ── Projection ─────────────────────────────────────────────────────

    /// The three stored inputs of `holder`'s balance.
    pub fn snapshot(&self, holder: &HolderAddress) -> AccrualSnapshot {
        AccrualSnapshot::new(
            self.principal.principal_of(holder),
            self.registry.holder_rate(holder),
            self.clock.last_update(holder),
        )
    }

    pub fn growth_factor_of(
        &self,
        holder: &HolderAddress,
        now: Timestamp,
    ) -> Result<u128, AccrualError> {
        self.snapshot(holder).growth_factor(now)
    }

    /// Effective balance of `holder` at `now`: principal with growth applied.
    pub fn balance_of(
        &self,
        holder: &HolderAddress,
        now: Timestamp,
    ) -> Result<u128, AccrualError> {
        self.snapshot(holder).effective_balance(now)
    }

    /// Raw principal of `holder`, without growth.
    pub fn principal_balance_of(&self, holder: &HolderAddress) -> u128 {
        self.principal.principal_of(holder)
    }

    pub fn total_principal(&self) -> u128 {
        self.principal.total_principal()
    }

    // ── Mutations ──────────────────────────────────────────────────────

    /// Checkpoint `holder` at `now` with no principal change.
    ///
    /// `caller` must be the holder itself or hold [`Role::Operator`].
    pub fn checkpoint(
        &mut self,
        caller: &HolderAddress,
        holder: &HolderAddress,
        now: Timestamp,
    ) -> Result<CheckpointPlan, AccrualError> {
        self.authorize_for(caller, holder)?;
        let plan = self.plan_checkpoint(holder, now)?;
        self.ensure_total_fits(&[plan.credit])?;
        self.commit_checkpoint(holder, &plan)?;
        Ok(plan)
    }

    /// Checkpoint `holder`, then credit `amount` of fresh principal.
    pub fn mint(
        &mut self,
        caller: &HolderAddress,
        holder: &HolderAddress,
        amount: u128,
        now: Timestamp,
    ) -> Result<(), AccrualError> {
        self.authorize(caller, Role::MintAndBurn)?;
        if amount == 0 {
            return Err(AccrualError::ZeroAmount);
        }
        let plan = self.plan_checkpoint(holder, now)?;
        plan.principal_after
            .checked_add(amount)
            .ok_or(AccrualError::ArithmeticOverflow)?;
        self.ensure_total_fits(&[plan.credit, amount])?;

        self.commit_checkpoint(holder, &plan)?;
        self.principal.credit_principal(holder, amount)?;
        debug!(holder = %holder, amount, at = %now, "minted principal");
        self.events.emit(&LedgerEvent::Minted {
            holder: holder.clone(),
            amount,
        });
        Ok(())
    }

    /// Checkpoint `holder`, then debit `amount` of principal.
    ///
    /// [`ALL`] burns the holder's whole post-checkpoint balance. Returns the
    /// amount burned.
    pub fn burn(
        &mut self,
        caller: &HolderAddress,
        holder: &HolderAddress,
        amount: u128,
        now: Timestamp,
    ) -> Result<u128, AccrualError> {
        self.authorize(caller, Role::MintAndBurn)?;
        if amount == 0 {
            return Err(AccrualError::ZeroAmount);
        }
        let plan = self.plan_checkpoint(holder, now)?;
        let amount = resolve_amount(amount, plan.principal_after)?;
        self.ensure_total_fits(&[plan.credit])?;

        self.commit_checkpoint(holder, &plan)?;
        self.principal.debit_principal(holder, amount)?;
        debug!(holder = %holder, amount, at = %now, "burned principal");
        self.events.emit(&LedgerEvent::Burned {
            holder: holder.clone(),
            amount,
        });
        Ok(amount)
    }

    /// Move `amount` of principal from `from` to `to`.
    ///
    /// Under [`TransferCheckpoint::BothParties`] the sender and then the
    /// recipient are checkpointed first, so each keeps what they earned under
    /// their own locked rate. [`ALL`] moves the sender's whole balance.
    /// `caller` must be the sender or hold [`Role::Operator`].
    /// Returns the amount moved.
    pub fn transfer(
        &mut self,
        caller: &HolderAddress,
        from: &HolderAddress,
        to: &HolderAddress,
        amount: u128,
        now: Timestamp,
    ) -> Result<u128, AccrualError> {
        self.authorize_for(caller, from)?;
        if amount == 0 {
            return Err(AccrualError::ZeroAmount);
        }
        let amount = match self.params.transfer_checkpoint {
            TransferCheckpoint::BothParties => self.transfer_checkpointed(from, to, amount, now)?,
            TransferCheckpoint::Disabled => self.transfer_raw(from, to, amount)?,
        };
        debug!(from = %from, to = %to, amount, at = %now, "transferred principal");
        self.events.emit(&LedgerEvent::Transferred {
            from: from.clone(),
            to: to.clone(),
            amount,
        });
        Ok(amount)
    }

    fn transfer_checkpointed(
        &mut self,
        from: &HolderAddress,
        to: &HolderAddress,
        amount: u128,
        now: Timestamp,
    ) -> Result<u128, AccrualError> {
        let from_plan = self.plan_checkpoint(from, now)?;
        let amount = resolve_amount(amount, from_plan.principal_after)?;
        if from == to {
            self.ensure_total_fits(&[from_plan.credit])?;
            self.commit_checkpoint(from, &from_plan)?;
            return Ok(amount);
        }
        let to_plan = self.plan_checkpoint(to, now)?;
        to_plan
            .principal_after
            .checked_add(amount)
            .ok_or(AccrualError::ArithmeticOverflow)?;
        self.ensure_total_fits(&[from_plan.credit, to_plan.credit])?;

        self.commit_checkpoint(from, &from_plan)?;
        self.commit_checkpoint(to, &to_plan)?;
        self.principal.debit_principal(from, amount)?;
        self.principal.credit_principal(to, amount)?;
        Ok(amount)
    }

    fn transfer_raw(
        &mut self,
        from: &HolderAddress,
        to: &HolderAddress,
        amount: u128,
    ) -> Result<u128, AccrualError> {
        let amount = resolve_amount(amount, self.principal.principal_of(from))?;
        if from == to {
            return Ok(amount);
        }
        self.principal
            .principal_of(to)
            .checked_add(amount)
            .ok_or(AccrualError::ArithmeticOverflow)?;
        self.principal.debit_principal(from, amount)?;
        self.principal.credit_principal(to, amount)?;
        Ok(amount)
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn authorize(&self, caller: &HolderAddress, role: Role) -> Result<(), AccrualError> {
        if self.access.is_authorized(caller, role) {
            return Ok(());
        }
        warn!(caller = %caller, role = %role, "unauthorized ledger call");
        Err(AccrualError::Unauthorized {
            caller: caller.to_string(),
            role,
        })
    }

    /// Holders act for themselves; anyone else needs [`Role::Operator`].
    fn authorize_for(
        &self,
        caller: &HolderAddress,
        holder: &HolderAddress,
    ) -> Result<(), AccrualError> {
        if caller == holder {
            return Ok(());
        }
        self.authorize(caller, Role::Operator)
    }

    fn plan_checkpoint(
        &self,
        holder: &HolderAddress,
        now: Timestamp,
    ) -> Result<CheckpointPlan, AccrualError> {
        projector::plan_checkpoint(&self.snapshot(holder), self.params.checkpoint_mode, now)
    }

    /// Total principal must absorb every planned credit.
    fn ensure_total_fits(&self, credits: &[u128]) -> Result<(), AccrualError> {
        credits
            .iter()
            .try_fold(self.principal.total_principal(), |total, c| total.checked_add(*c))
            .map(|_| ())
            .ok_or(AccrualError::ArithmeticOverflow)
    }

    fn commit_checkpoint(
        &mut self,
        holder: &HolderAddress,
        plan: &CheckpointPlan,
    ) -> Result<(), AccrualError> {
        let first = !self.clock.is_tracked(holder);
        if plan.credit > 0 {
            self.principal.credit_principal(holder, plan.credit)?;
            self.events.emit(&LedgerEvent::InterestMaterialized {
                holder: holder.clone(),
                amount: plan.credit,
                at: plan.at,
            });
        }
        let forfeited = plan.forfeited();
        if forfeited > 0 {
            self.events.emit(&LedgerEvent::InterestForfeited {
                holder: holder.clone(),
                amount: forfeited,
                at: plan.at,
            });
        }
        self.clock.touch(holder, plan.at);
        let locked = if plan.locks_rate {
            self.registry.lock_if_unset(holder)
        } else {
            None
        };
        if first {
            let rate = locked.unwrap_or_else(|| self.registry.holder_rate(holder));
            debug!(holder = %holder, rate = %rate, at = %plan.at, "holder activated");
            self.events.emit(&LedgerEvent::HolderActivated {
                holder: holder.clone(),
                rate,
                at: plan.at,
            });
        } else if let Some(rate) = locked.filter(|r| !r.is_zero()) {
            debug!(holder = %holder, rate = %rate, at = %plan.at, "holder rate locked");
            self.events.emit(&LedgerEvent::RateLocked {
                holder: holder.clone(),
                rate,
                at: plan.at,
            });
        }
        debug!(
            holder = %holder,
            at = %plan.at,
            owed = plan.owed,
            credited = plan.credit,
            "checkpointed holder"
        );
        Ok(())
    }
}

/// Resolve [`ALL`] against `available` and check the holder can cover it.
fn resolve_amount(amount: u128, available: u128) -> Result<u128, AccrualError> {
    let amount = if amount == ALL { available } else { amount };
    if amount == 0 {
        return Err(AccrualError::ZeroAmount);
    }
    if available < amount {
        return Err(AccrualError::InsufficientPrincipal {
            needed: amount,
            available,
        });
    }
    Ok(amount)
}

impl<P: PrincipalLedger, A: AccessControl> RebaseLedger<P, A> {
    /// Persist the global rate and every holder record to an accrual store.
    ///
    /// Principal is not written; it belongs to the principal ledger.
    pub fn save_to_store(&self, store: &dyn AccrualStore) -> Result<(), AccrualError> {
        let global = bincode::serialize(&self.registry.global())
            .map_err(|e| AccrualError::Serialization(e.to_string()))?;
        store.put_meta(GLOBAL_RATE_KEY, &global)?;

        for holder in self.clock.holders() {
            let record = HolderRecord {
                rate: self.registry.holder_rate(holder),
                last_update: self.clock.last_update(holder),
            };
            let bytes = bincode::serialize(&record)
                .map_err(|e| AccrualError::Serialization(e.to_string()))?;
            store.put_holder_record(holder, &bytes)?;
        }
        debug!(holders = self.clock.len(), "saved accrual state");
        Ok(())
    }

    /// Restore a ledger from an accrual store.
    ///
    /// A store with no global rate yields `params.initial_rate` at version 0.
    pub fn load_from_store(
        store: &dyn AccrualStore,
        params: LedgerParams,
        principal: P,
        access: A,
    ) -> Result<Self, AccrualError> {
        let global = match store.get_meta(GLOBAL_RATE_KEY)? {
            Some(bytes) => bincode::deserialize(&bytes)
                .map_err(|e| AccrualError::Serialization(e.to_string()))?,
            None => GlobalRate::new(params.initial_rate),
        };
        let mut registry = RateRegistry::with_global(global, params.rate_policy);
        let mut clock = AccrualClock::new();
        for (holder, bytes) in store.iter_holder_records()? {
            let record: HolderRecord = bincode::deserialize(&bytes)
                .map_err(|e| AccrualError::Serialization(e.to_string()))?;
            clock.touch(&holder, record.last_update);
            registry.restore_holder_rate(holder, record.rate);
        }
        debug!(holders = clock.len(), version = global.version, "loaded accrual state");
        Ok(Self {
            params,
            registry,
            clock,
            principal,
            access,
            events: EventBus::new(),
        })
    }
}
