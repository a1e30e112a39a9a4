//! Balance projection: pure growth-factor math and checkpoint planning.
//!
//! Nothing here touches ledger state. Every function takes an explicit
//! [`AccrualSnapshot`] and a query time, so results are a deterministic
//! function of their inputs and can be tested without a ledger.

use crate::error::AccrualError;
use accrue_types::{CheckpointMode, Rate, Timestamp, ONE};

/// Everything needed to project one holder's balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccrualSnapshot {
    /// Raw principal from the principal ledger.
    pub principal: u128,
    /// Rate locked for the holder, zero if never checkpointed.
    pub rate: Rate,
    /// Last checkpoint, epoch if never checkpointed.
    pub last_update: Timestamp,
}

impl AccrualSnapshot {
    pub fn new(principal: u128, rate: Rate, last_update: Timestamp) -> Self {
        Self {
            principal,
            rate,
            last_update,
        }
    }

    pub fn growth_factor(&self, now: Timestamp) -> Result<u128, AccrualError> {
        growth_factor(self.rate, self.last_update, now)
    }

    pub fn effective_balance(&self, now: Timestamp) -> Result<u128, AccrualError> {
        effective_balance(self.principal, self.growth_factor(now)?)
    }

    /// Interest owed since the last checkpoint: effective balance minus principal.
    pub fn accrued_interest(&self, now: Timestamp) -> Result<u128, AccrualError> {
        // growth >= ONE, so effective >= principal
        Ok(self.effective_balance(now)? - self.principal)
    }
}

/// Linear growth since `last_update`: `ONE + rate × elapsed`.
///
/// Returns exactly [`ONE`] when no time has elapsed or the rate is zero,
/// which covers holders that were never checkpointed. A `now` earlier than
/// `last_update` counts as zero elapsed.
pub fn growth_factor(
    rate: Rate,
    last_update: Timestamp,
    now: Timestamp,
) -> Result<u128, AccrualError> {
    let elapsed = last_update.elapsed_since(now);
    if elapsed == 0 || rate.is_zero() {
        return Ok(ONE);
    }
    rate.checked_accrual(elapsed)
        .and_then(|growth| ONE.checked_add(growth))
        .ok_or(AccrualError::ArithmeticOverflow)
}

/// `principal × growth / ONE`, truncated toward zero.
///
/// The product is split on `ONE` boundaries so that only a result which
/// genuinely exceeds `u128` overflows:
/// with `principal = q·ONE + r` and `growth = g·ONE + f`,
/// `principal·growth/ONE = principal·g + q·f + ⌊r·f/ONE⌋` exactly.
pub fn effective_balance(principal: u128, growth: u128) -> Result<u128, AccrualError> {
    let (g, f) = (growth / ONE, growth % ONE);
    let (q, r) = (principal / ONE, principal % ONE);
    // r, f < 1e18, so r·f < 1e36 < u128::MAX
    let tail = r * f / ONE;
    principal
        .checked_mul(g)
        .and_then(|whole| q.checked_mul(f).and_then(|mid| whole.checked_add(mid)))
        .and_then(|sum| sum.checked_add(tail))
        .ok_or(AccrualError::ArithmeticOverflow)
}

/// The outcome of checkpointing one holder, computed before any state changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckpointPlan {
    /// Interest owed at `at` under the holder's locked rate.
    pub owed: u128,
    /// Portion of `owed` credited to principal.
    pub credit: u128,
    /// Principal once `credit` is applied.
    pub principal_after: u128,
    /// Whether the checkpoint locks the global rate onto the holder.
    pub locks_rate: bool,
    /// New last-update timestamp.
    pub at: Timestamp,
}

impl CheckpointPlan {
    /// Owed interest that the checkpoint drops instead of crediting.
    pub fn forfeited(&self) -> u128 {
        self.owed - self.credit
    }
}

/// Plan a checkpoint of `snapshot` at `now`.
///
/// Fails with [`AccrualError::ClockRegression`] if `now` precedes the stored
/// last update, and with [`AccrualError::ArithmeticOverflow`] if projecting
/// the owed interest overflows.
pub fn plan_checkpoint(
    snapshot: &AccrualSnapshot,
    mode: CheckpointMode,
    now: Timestamp,
) -> Result<CheckpointPlan, AccrualError> {
    if now < snapshot.last_update {
        return Err(AccrualError::ClockRegression {
            last: snapshot.last_update,
            now,
        });
    }
    let owed = snapshot.accrued_interest(now)?;
    let credit = match mode {
        CheckpointMode::Materialize => owed,
        CheckpointMode::ClockOnly => 0,
    };
    let principal_after = snapshot
        .principal
        .checked_add(credit)
        .ok_or(AccrualError::ArithmeticOverflow)?;
    Ok(CheckpointPlan {
        owed,
        credit,
        principal_after,
        locks_rate: snapshot.rate.is_zero(),
        at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrue_types::DEFAULT_GLOBAL_RATE;

    fn ts(secs: u64) -> Timestamp {
        Timestamp::new(secs)
    }

    #[test]
    fn growth_is_one_for_zero_rate_or_zero_elapsed() {
        assert_eq!(growth_factor(Rate::ZERO, ts(0), ts(10_000)).unwrap(), ONE);
        assert_eq!(growth_factor(DEFAULT_GLOBAL_RATE, ts(500), ts(500)).unwrap(), ONE);
    }

    #[test]
    fn growth_is_linear_in_elapsed_time() {
        let g = growth_factor(DEFAULT_GLOBAL_RATE, ts(0), ts(1000)).unwrap();
        assert_eq!(g, ONE + 50_000_000_000_000);
        let g2 = growth_factor(DEFAULT_GLOBAL_RATE, ts(0), ts(2000)).unwrap();
        assert_eq!(g2 - ONE, 2 * (g - ONE));
    }

    #[test]
    fn growth_with_stale_now_is_one() {
        assert_eq!(growth_factor(DEFAULT_GLOBAL_RATE, ts(900), ts(100)).unwrap(), ONE);
    }

    #[test]
    fn growth_overflow_is_an_error() {
        let err = growth_factor(Rate::new(u128::MAX / 2), ts(0), ts(3)).unwrap_err();
        assert!(matches!(err, AccrualError::ArithmeticOverflow));
        // rate × elapsed fits, but adding ONE does not
        let err = growth_factor(Rate::new(u128::MAX - ONE + 1), ts(0), ts(1)).unwrap_err();
        assert!(matches!(err, AccrualError::ArithmeticOverflow));
    }

    #[test]
    fn small_principal_truncates_to_principal() {
        let g = ONE + 50_000_000_000_000;
        assert_eq!(effective_balance(100, g).unwrap(), 100);
    }

    #[test]
    fn large_principal_picks_up_fractional_growth() {
        // 1e18 units at 1.00005× → 1e18 + 5e13
        let g = ONE + 50_000_000_000_000;
        assert_eq!(effective_balance(ONE, g).unwrap(), ONE + 50_000_000_000_000);
    }

    #[test]
    fn effective_balance_matches_naive_formula_when_it_fits() {
        let cases = [
            (0u128, ONE),
            (1, ONE * 3 / 2),
            (999_999, ONE + 123_456_789),
            (12_345_678_901_234_567_890, ONE * 2 + 7),
        ];
        for (principal, growth) in cases {
            let naive = principal * growth / ONE;
            assert_eq!(effective_balance(principal, growth).unwrap(), naive);
        }
    }

    #[test]
    fn effective_balance_handles_principals_beyond_naive_range() {
        // principal × growth alone overflows u128 but the result fits.
        let principal = u128::MAX / 4;
        let growth = ONE + ONE / 2;
        let expected = principal + principal / 2;
        assert_eq!(effective_balance(principal, growth).unwrap(), expected);
    }

    #[test]
    fn effective_balance_overflow_is_an_error() {
        let err = effective_balance(u128::MAX, ONE * 2).unwrap_err();
        assert!(matches!(err, AccrualError::ArithmeticOverflow));
    }

    #[test]
    fn plan_materialize_credits_owed_interest() {
        let snap = AccrualSnapshot::new(ONE, DEFAULT_GLOBAL_RATE, ts(0));
        let plan = plan_checkpoint(&snap, CheckpointMode::Materialize, ts(1000)).unwrap();
        assert_eq!(plan.owed, 50_000_000_000_000);
        assert_eq!(plan.credit, plan.owed);
        assert_eq!(plan.principal_after, ONE + plan.owed);
        assert_eq!(plan.forfeited(), 0);
        assert!(!plan.locks_rate);
    }

    #[test]
    fn plan_clock_only_forfeits_owed_interest() {
        let snap = AccrualSnapshot::new(ONE, DEFAULT_GLOBAL_RATE, ts(0));
        let plan = plan_checkpoint(&snap, CheckpointMode::ClockOnly, ts(1000)).unwrap();
        assert_eq!(plan.credit, 0);
        assert_eq!(plan.principal_after, ONE);
        assert_eq!(plan.forfeited(), 50_000_000_000_000);
    }

    #[test]
    fn plan_for_fresh_holder_locks_rate() {
        let snap = AccrualSnapshot::new(0, Rate::ZERO, Timestamp::EPOCH);
        let plan = plan_checkpoint(&snap, CheckpointMode::Materialize, ts(42)).unwrap();
        assert!(plan.locks_rate);
        assert_eq!(plan.owed, 0);
        assert_eq!(plan.at, ts(42));
    }

    #[test]
    fn plan_rejects_backward_time() {
        let snap = AccrualSnapshot::new(10, DEFAULT_GLOBAL_RATE, ts(500));
        let err = plan_checkpoint(&snap, CheckpointMode::Materialize, ts(499)).unwrap_err();
        assert!(matches!(
            err,
            AccrualError::ClockRegression { last, now } if last == ts(500) && now == ts(499)
        ));
    }
}
