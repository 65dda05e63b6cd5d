use serde::Serialize;

use crate::models::{DrawHistory, POOL_SIZE};

/// Retard de chaque numéro (en tirages) sur une fenêtre de `window_len` tirages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverdueTable {
    delays: [u32; POOL_SIZE],
    window_len: usize,
}

impl OverdueTable {
    pub fn get(&self, number: u8) -> u32 {
        match number {
            1..=25 => self.delays[(number - 1) as usize],
            _ => 0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.delays
            .iter()
            .enumerate()
            .map(|(i, &d)| ((i + 1) as u8, d))
    }

    pub fn delays(&self) -> &[u32; POOL_SIZE] {
        &self.delays
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Du plus en retard au moins en retard, numéro croissant à égalité.
    pub fn ranked(&self) -> Vec<(u8, u32)> {
        let mut ranked: Vec<(u8, u32)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }
}

/// Retards calculés sur les `window_size` derniers tirages (tout l'historique
/// si absent, nul ou plus grand que l'historique).
///
/// Un numéro vu pour la dernière fois en position `p` (0 = début de fenêtre)
/// a un retard de `(L - 1) - p` ; un numéro absent de la fenêtre reçoit `L`,
/// la valeur maximale possible.
pub fn compute_overdue(history: &DrawHistory, window_size: Option<usize>) -> OverdueTable {
    let window = history.window(window_size);
    let window_len = window.len();

    let mut last_seen: [Option<usize>; POOL_SIZE] = [None; POOL_SIZE];
    for (pos, draw) in window.iter().enumerate() {
        for &n in draw.numbers() {
            last_seen[(n - 1) as usize] = Some(pos);
        }
    }

    let mut delays = [0u32; POOL_SIZE];
    for (delay, seen) in delays.iter_mut().zip(last_seen) {
        *delay = match seen {
            Some(pos) => (window_len - 1 - pos) as u32,
            None => window_len as u32,
        };
    }

    OverdueTable { delays, window_len }
}
