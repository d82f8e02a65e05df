//! Bonus calculator: daily login streak bonus and coin-to-credit
//! conversion arithmetic. Pure functions over [`RewardConfig`]; the engine
//! applies the wallet effects.

use docket_core::RewardConfig;

/// Daily bonus for a streak of `streak` consecutive days (1-based).
///
/// Streaks past the end of the schedule clamp to the last (highest) entry;
/// the schedule does not grow unbounded. A zero streak pays nothing.
pub fn daily_bonus(config: &RewardConfig, streak: u32) -> u32 {
    let schedule = &config.daily_bonus_schedule;
    if streak == 0 || schedule.is_empty() {
        return 0;
    }
    let idx = (streak as usize).min(schedule.len()) - 1;
    schedule[idx]
}

/// Credits a balance converts to: whole credits only, capped by the
/// monthly limit regardless of balance.
pub fn credits_from_coins(config: &RewardConfig, coin_balance: u64) -> u32 {
    let uncapped = coin_balance / config.coins_per_credit;
    (uncapped.min(config.monthly_credit_cap as u64)) as u32
}

/// Coins debited for a given credit count. The conversion debits exactly
/// this amount, not the full balance; any remainder below one credit's
/// worth stays in the wallet.
pub fn coins_needed_for_credits(config: &RewardConfig, credits: u32) -> u64 {
    credits as u64 * config.coins_per_credit
}
