use std::collections::HashMap;

use itertools::Itertools;

use crate::models::DrawHistory;

/// Nombre de tirages contenant chaque combinaison de `K` numéros
/// (clé triée par ordre croissant).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CooccurrenceTable<const K: usize> {
    counts: HashMap<[u8; K], u32>,
}

impl<const K: usize> CooccurrenceTable<K> {
    fn build(history: &DrawHistory) -> Self {
        let mut counts = HashMap::new();
        for draw in history.draws() {
            // Les numéros d'un tirage sont triés : chaque combinaison sort déjà canonique.
            for combo in draw.numbers().iter().copied().combinations(K) {
                let mut key = [0u8; K];
                key.copy_from_slice(&combo);
                *counts.entry(key).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    pub fn get(&self, combo: [u8; K]) -> u32 {
        let mut key = combo;
        key.sort_unstable();
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    /// Les `k` combinaisons les plus fréquentes ; à égalité, ordre
    /// lexicographique croissant.
    pub fn top_k(&self, k: usize) -> Vec<([u8; K], u32)> {
        let mut entries: Vec<([u8; K], u32)> = self.counts.iter().map(|(&key, &c)| (key, c)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries.truncate(k);
        entries
    }
}

pub fn compute_pair_frequencies(history: &DrawHistory) -> CooccurrenceTable<2> {
    CooccurrenceTable::build(history)
}

pub fn compute_triple_frequencies(history: &DrawHistory) -> CooccurrenceTable<3> {
    CooccurrenceTable::build(history)
}
