use serde::Serialize;

use crate::models::{DrawHistory, PICK_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RepeatRecord {
    pub contest_id: u32,
    pub repeated: usize,
}

/// Pour chaque tirage à partir du deuxième, nombre de numéros repris du précédent.
pub fn compute_repeats(history: &DrawHistory) -> Vec<RepeatRecord> {
    history
        .draws()
        .windows(2)
        .map(|w| RepeatRecord {
            contest_id: w[1].contest_id,
            repeated: w[1].overlap(&w[0]),
        })
        .collect()
}

/// `[k]` = nombre de tirages ayant repris exactement `k` numéros.
pub fn repeat_distribution(records: &[RepeatRecord]) -> [u32; PICK_COUNT + 1] {
    let mut dist = [0u32; PICK_COUNT + 1];
    for r in records {
        dist[r.repeated] += 1;
    }
    dist
}

/// Nombre de reprises le plus fréquent (le plus petit à égalité).
pub fn typical_repeat(records: &[RepeatRecord]) -> Option<usize> {
    if records.is_empty() {
        return None;
    }
    let dist = repeat_distribution(records);
    dist.iter()
        .enumerate()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
        .map(|(k, _)| k)
}
