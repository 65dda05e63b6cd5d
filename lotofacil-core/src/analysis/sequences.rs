use std::collections::HashMap;

use crate::models::{DrawHistory, PICK_COUNT};

/// Séquences de `length` numéros consécutifs (ex. 7-8-9) présentes dans les
/// tirages, classées par fréquence décroissante puis ordre croissant.
pub fn consecutive_runs(history: &DrawHistory, length: usize) -> Vec<(Vec<u8>, u32)> {
    if !(2..=PICK_COUNT).contains(&length) {
        return Vec::new();
    }

    // Une séquence est entièrement déterminée par son premier numéro.
    let mut counts: HashMap<u8, u32> = HashMap::new();
    for draw in history.draws() {
        for w in draw.numbers().windows(length) {
            if (w[length - 1] - w[0]) as usize == length - 1 {
                *counts.entry(w[0]).or_insert(0) += 1;
            }
        }
    }

    let mut runs: Vec<(Vec<u8>, u32)> = counts
        .into_iter()
        .map(|(start, c)| ((start..start + length as u8).collect(), c))
        .collect();
    runs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    runs
}
