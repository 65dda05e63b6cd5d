use serde::Serialize;
use statrs::statistics::{Data, Distribution, Median};

use crate::models::{DrawHistory, POOL_SIZE};

/// Nombre d'apparitions de chaque numéro (index = numéro - 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    counts: [u32; POOL_SIZE],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencySummary {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl FrequencyTable {
    pub fn get(&self, number: u8) -> u32 {
        match number {
            1..=25 => self.counts[(number - 1) as usize],
            _ => 0,
        }
    }

    /// Couples (numéro, fréquence) dans l'ordre des numéros.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &c)| ((i + 1) as u8, c))
    }

    pub fn weights(&self) -> &[u32; POOL_SIZE] {
        &self.counts
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Fréquence décroissante, numéro croissant à égalité.
    pub fn ranked(&self) -> Vec<(u8, u32)> {
        let mut ranked: Vec<(u8, u32)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }

    pub fn summary(&self) -> FrequencySummary {
        let data = Data::new(self.counts.iter().map(|&c| c as f64).collect::<Vec<_>>());
        FrequencySummary {
            mean: data.mean().unwrap_or(0.0),
            median: data.median(),
            std_dev: data.std_dev().unwrap_or(0.0),
        }
    }
}

pub fn compute_frequency(history: &DrawHistory) -> FrequencyTable {
    let mut counts = [0u32; POOL_SIZE];
    for draw in history.draws() {
        for &n in draw.numbers() {
            counts[(n - 1) as usize] += 1;
        }
    }
    FrequencyTable { counts }
}
