//! Score formulas for daily challenges, leaderboards and battles.
//!
//! All formulas round half to even.

use std::cmp::Ordering;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The metrics a passed circuit is scored on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Interior gate count.
    pub gate_count: usize,
    /// Longest path reported by the runner.
    pub longest_path: u32,
    /// Time taken to solve.
    pub duration: Duration,
}

/// Numerators of the daily score terms.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the gate-count term.
    pub gate: f64,
    /// Weight of the path term.
    pub path: f64,
    /// Weight of the duration term.
    pub duration: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            gate: 100.0,
            path: 100.0,
            duration: 100.0,
        }
    }
}

/// Daily challenge score: each weight divided by its metric (at least 1), summed.
pub fn daily_score(metrics: &Metrics, weights: &ScoreWeights) -> i64 {
    let total = weights.gate / at_least_one(metrics.gate_count as f64)
        + weights.path / at_least_one(f64::from(metrics.longest_path))
        + weights.duration / at_least_one(metrics.duration.as_secs_f64());
    total.round_ties_even() as i64
}

/// A passed submission on a daily leaderboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player name.
    pub player: String,
    /// Submission metrics.
    pub metrics: Metrics,
}

/// A leaderboard row with its relative score.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ranked<'a> {
    /// The entry.
    pub entry: &'a LeaderboardEntry,
    /// Score relative to the day's best metrics.
    pub score: i64,
}

/// Ranks entries by relative score, highest first; ties go to the faster player.
///
/// Each entry scores `best_path / path + least_gates / gates +
/// longest_duration / duration`, every divisor at least 1. At most `limit`
/// rows are returned.
pub fn leaderboard(entries: &[LeaderboardEntry], limit: usize) -> Vec<Ranked<'_>> {
    let Some(first) = entries.first() else {
        return Vec::new();
    };
    let (mut best_path, mut least_gates, mut longest) = (
        first.metrics.longest_path,
        first.metrics.gate_count,
        first.metrics.duration,
    );
    for e in entries {
        best_path = best_path.min(e.metrics.longest_path);
        least_gates = least_gates.min(e.metrics.gate_count);
        longest = longest.max(e.metrics.duration);
    }

    let mut ranked: Vec<Ranked<'_>> = entries
        .iter()
        .map(|entry| {
            let m = &entry.metrics;
            let score = f64::from(best_path) / at_least_one(f64::from(m.longest_path))
                + least_gates as f64 / at_least_one(m.gate_count as f64)
                + longest.as_secs_f64() / at_least_one(m.duration.as_secs_f64());
            Ranked {
                entry,
                score: score.round_ties_even() as i64,
            }
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.entry.metrics.duration.cmp(&b.entry.metrics.duration))
    });
    ranked.truncate(limit);
    ranked
}

/// One player's result in a battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleEntry {
    /// Player name.
    pub player: String,
    /// Whether the player submitted at least once.
    pub attempted: bool,
    /// Whether the final submission passed.
    pub passed: bool,
    /// Interior gate count of the final submission.
    pub gate_count: usize,
    /// Time from battle start to submission.
    pub elapsed: Duration,
}

/// A scored battle player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Standing {
    /// Player name.
    pub player: String,
    /// Battle score; lower is better.
    pub score: i64,
    /// Whether this player won.
    pub winner: bool,
    /// Rating awarded: distance from the worst score plus 50.
    pub rating: i64,
}

/// Scores a battle. Only passed players are scored.
///
/// A player's score is their elapsed seconds, rounded, minus ten points per
/// gate they used below the (floored) average gate count of every player
/// who attempted. The lowest score wins; the first such player on ties.
pub fn battle_standings(entries: &[BattleEntry]) -> Vec<Standing> {
    let attempted: Vec<_> = entries.iter().filter(|e| e.attempted).collect();
    let average = if attempted.is_empty() {
        0
    } else {
        let sum: usize = attempted.iter().map(|e| e.gate_count).sum();
        (sum / attempted.len()) as i64
    };

    let mut standings: Vec<Standing> = entries
        .iter()
        .filter(|e| e.passed)
        .map(|e| Standing {
            player: e.player.clone(),
            score: e.elapsed.as_secs_f64().round_ties_even() as i64
                - (average - e.gate_count as i64) * 10,
            winner: false,
            rating: 0,
        })
        .collect();

    let highest = standings.iter().map(|s| s.score).max().unwrap_or(0);
    let winner = standings
        .iter()
        .enumerate()
        .min_by(|(ia, a), (ib, b)| match a.score.cmp(&b.score) {
            Ordering::Equal => ia.cmp(ib),
            other => other,
        })
        .map(|(i, _)| i);
    for (i, s) in standings.iter_mut().enumerate() {
        s.winner = Some(i) == winner;
        s.rating = highest - s.score + 50;
    }
    standings
}

fn at_least_one(v: f64) -> f64 {
    v.max(1.0)
}
