/// Simulation constants and tunable parameters.
///
/// Rating conversions follow the level-70 tables: 12.6 hit rating, 22.08 crit
/// rating and 15.77 haste rating per percentage point. The constants below are
/// expressed as "rating for a full 100%" so they can be used as plain divisors.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig;

impl SimConfig {
    // ===== time =====
    /// Number of ticks that make up one simulated second.
    pub const TICKS_PER_SECOND: u64 = 30;

    // ===== spell resolution =====
    pub const BASE_HIT_CHANCE: f64 = 0.83;
    pub const MAX_HIT_CHANCE: f64 = 0.99;
    pub const HIT_RATING_PER_CHANCE: f64 = 1260.0;
    pub const CRIT_RATING_PER_CHANCE: f64 = 2208.0;
    pub const HASTE_RATING_PER_CHANCE: f64 = 1577.0;
    pub const CRIT_DAMAGE_MULTIPLIER: f64 = 2.0;

    /// Flat stand-in for the unmodelled target resistance formula.
    pub const PARTIAL_RESIST_CHANCE: f64 = 0.025;
    pub const PARTIAL_RESIST_MULTIPLIER: f64 = 0.75;

    // ===== shared cooldowns =====
    pub const TRINKET_SHARED_COOLDOWN_SECS: u64 = 30;
    pub const CONSUMABLE_COOLDOWN_SECS: u64 = 120;

    // ===== talents =====
    pub const ELEMENTAL_PRECISION_HIT_PER_RANK: f64 = 0.02;
    pub const NATURES_GUIDANCE_HIT_PER_RANK: f64 = 0.01;
    pub const LIGHTNING_CRIT_PER_RANK: f64 = 0.01;
    pub const CONCUSSION_DAMAGE_PER_RANK: f64 = 0.01;
    pub const CONVECTION_COST_PER_RANK: f64 = 0.02;
    pub const OVERLOAD_CHANCE_PER_RANK: f64 = 0.04;
    pub const OVERLOAD_DAMAGE_MULTIPLIER: f64 = 0.5;
    pub const ELEMENTAL_MASTERY_COOLDOWN_SECS: u64 = 180;
    pub const ELEMENTAL_FOCUS_DURATION_SECS: u64 = 15;
    pub const ELEMENTAL_FOCUS_COST_MULTIPLIER: f64 = 0.6;

    // ===== group and external buffs =====
    /// 30% haste expressed as rating.
    pub const BLOODLUST_HASTE_RATING: f64 = 473.1;
    pub const BLOODLUST_DURATION_SECS: u64 = 15;
    pub const BLOODLUST_COOLDOWN_SECS: u64 = 40;
    pub const JUDGEMENT_OF_WISDOM_CHANCE: f64 = 0.5;
    pub const JUDGEMENT_OF_WISDOM_MANA: f64 = 74.0;
    pub const WATER_SHIELD_ORB_MANA: f64 = 204.0;

    // ===== items =====
    pub const CAPACITOR_CHARGES: u32 = 3;
    pub const CAPACITOR_INTERNAL_COOLDOWN_MS: u64 = 2500;

    /// Converts whole seconds into ticks, saturating at `u64::MAX`.
    #[inline]
    pub const fn seconds_to_ticks(seconds: u64) -> u64 {
        seconds.saturating_mul(Self::TICKS_PER_SECOND)
    }

    /// Converts milliseconds into ticks, truncating partial ticks.
    #[inline]
    pub const fn millis_to_ticks(millis: u64) -> u64 {
        millis.saturating_mul(Self::TICKS_PER_SECOND) / 1000
    }
}
