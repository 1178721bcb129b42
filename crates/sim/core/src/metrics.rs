//! Per-run accumulators and multi-run summaries.

use crate::state::Cast;

/// Snapshot taken the first time the caster cannot afford its next spell.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OomEvent {
    pub at_second: u64,
    pub damage: f64,
}

/// Results of one run. Created fresh at reset and returned by value.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimMetrics {
    pub total_damage: f64,
    /// Damage dealt before the first out-of-mana event.
    pub damage_at_oom: f64,
    /// Second of the first out-of-mana event, 0 when it never happened.
    pub oom_at_second: u64,
    pub ran_out_of_mana: bool,
    pub ending_mana: f64,
    /// Casts that missed. Missed casts are not archived.
    pub misses: u32,
    /// Casts that hit, in resolution order, procs included.
    pub casts: Vec<Cast>,
}

impl SimMetrics {
    /// Records the out-of-mana snapshot. Returns false if one already exists.
    pub fn record_oom(&mut self, at_second: u64) -> bool {
        if self.ran_out_of_mana {
            return false;
        }
        self.ran_out_of_mana = true;
        self.oom_at_second = at_second;
        self.damage_at_oom = self.total_damage;
        true
    }

    pub fn oom_event(&self) -> Option<OomEvent> {
        self.ran_out_of_mana.then_some(OomEvent {
            at_second: self.oom_at_second,
            damage: self.damage_at_oom,
        })
    }

    /// Archives a cast that landed.
    pub fn record_hit(&mut self, cast: Cast) {
        self.total_damage += cast.damage;
        self.casts.push(cast);
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn crits(&self) -> usize {
        self.casts.iter().filter(|cast| cast.did_crit).count()
    }

    pub fn procs(&self) -> usize {
        self.casts.iter().filter(|cast| cast.is_proc).count()
    }

    pub fn dps(&self, duration_secs: u64) -> f64 {
        if duration_secs == 0 {
            return 0.0;
        }
        self.total_damage / duration_secs as f64
    }
}

/// Aggregate over several seeded runs.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialSummary {
    pub trials: u32,
    pub duration_secs: u64,
    pub mean_damage: f64,
    pub min_damage: f64,
    pub max_damage: f64,
    pub std_dev_damage: f64,
    pub mean_dps: f64,
    /// Fraction of runs that went out of mana.
    pub oom_rate: f64,
    pub mean_ending_mana: f64,
}

impl TrialSummary {
    pub fn from_runs(runs: &[SimMetrics], duration_secs: u64) -> Self {
        if runs.is_empty() {
            return Self {
                duration_secs,
                ..Self::default()
            };
        }

        let n = runs.len() as f64;
        let damages = runs.iter().map(|run| run.total_damage);
        let mean_damage = damages.clone().sum::<f64>() / n;
        let variance = damages
            .clone()
            .map(|d| (d - mean_damage).powi(2))
            .sum::<f64>()
            / n;
        let oom_runs = runs.iter().filter(|run| run.ran_out_of_mana).count();

        Self {
            trials: runs.len() as u32,
            duration_secs,
            mean_damage,
            min_damage: damages.clone().fold(f64::INFINITY, f64::min),
            max_damage: damages.fold(f64::NEG_INFINITY, f64::max),
            std_dev_damage: variance.sqrt(),
            mean_dps: if duration_secs == 0 {
                0.0
            } else {
                mean_damage / duration_secs as f64
            },
            oom_rate: oom_runs as f64 / n,
            mean_ending_mana: runs.iter().map(|run| run.ending_mana).sum::<f64>() / n,
        }
    }
}
