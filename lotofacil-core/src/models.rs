use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

pub const POOL_SIZE: usize = 25;
pub const PICK_COUNT: usize = 15;

pub const PRIMES: [u8; 9] = [2, 3, 5, 7, 11, 13, 17, 19, 23];
pub const COMPOSITES_AND_ONE: [u8; 16] = [1, 4, 6, 8, 9, 10, 12, 14, 15, 16, 18, 20, 21, 22, 24, 25];
pub const EVENS: [u8; 12] = [2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24];
pub const ODDS: [u8; 13] = [1, 3, 5, 7, 9, 11, 13, 15, 17, 19, 21, 23, 25];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedDrawError {
    #[error("Concours {contest_id} : {count} numéros au lieu de 15")]
    WrongCount { contest_id: u32, count: usize },
    #[error("Concours {contest_id} : numéro {number} hors limites (1-25)")]
    OutOfRange { contest_id: u32, number: u8 },
    #[error("Concours {contest_id} : numéro en double {number}")]
    DuplicateNumber { contest_id: u32, number: u8 },
    #[error("Concours {contest_id} présent plusieurs fois")]
    DuplicateContest { contest_id: u32 },
}

/// Réservoirs fixes dans lesquels les politiques de génération puisent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    All,
    Evens,
    Odds,
    Primes,
    CompositesAndOne,
}

impl Pool {
    pub fn numbers(&self) -> &'static [u8] {
        match self {
            Pool::All => &ALL_NUMBERS,
            Pool::Evens => &EVENS,
            Pool::Odds => &ODDS,
            Pool::Primes => &PRIMES,
            Pool::CompositesAndOne => &COMPOSITES_AND_ONE,
        }
    }

    pub fn size(&self) -> usize {
        self.numbers().len()
    }
}

const ALL_NUMBERS: [u8; POOL_SIZE] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Draw {
    pub contest_id: u32,
    numbers: [u8; PICK_COUNT],
}

impl Draw {
    pub fn new(contest_id: u32, numbers: &[u8]) -> Result<Self, MalformedDrawError> {
        if numbers.len() != PICK_COUNT {
            return Err(MalformedDrawError::WrongCount {
                contest_id,
                count: numbers.len(),
            });
        }

        let mut seen = [false; POOL_SIZE + 1];
        for &n in numbers {
            if n < 1 || n as usize > POOL_SIZE {
                return Err(MalformedDrawError::OutOfRange { contest_id, number: n });
            }
            if seen[n as usize] {
                return Err(MalformedDrawError::DuplicateNumber { contest_id, number: n });
            }
            seen[n as usize] = true;
        }

        let mut sorted = [0u8; PICK_COUNT];
        sorted.copy_from_slice(numbers);
        sorted.sort_unstable();

        Ok(Self {
            contest_id,
            numbers: sorted,
        })
    }

    /// Numéros triés par ordre croissant.
    pub fn numbers(&self) -> &[u8; PICK_COUNT] {
        &self.numbers
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.binary_search(&number).is_ok()
    }

    /// Bit `n` positionné pour chaque numéro `n` du tirage.
    pub fn mask(&self) -> u32 {
        self.numbers.iter().fold(0u32, |acc, &n| acc | (1 << n))
    }

    /// Nombre de numéros communs avec `other`.
    pub fn overlap(&self, other: &Draw) -> usize {
        (self.mask() & other.mask()).count_ones() as usize
    }

    /// Numéros de 1-25 absents du tirage.
    pub fn complement(&self) -> Vec<u8> {
        ALL_NUMBERS
            .iter()
            .copied()
            .filter(|&n| !self.contains(n))
            .collect()
    }
}

/// Instantané immuable de l'historique, trié par numéro de concours croissant.
///
/// Le clonage partage le même stockage ; une mise à jour produit un nouvel
/// instantané sans toucher à l'ancien.
#[derive(Debug, Clone, Default)]
pub struct DrawHistory {
    draws: Arc<[Draw]>,
}

impl DrawHistory {
    pub fn new<I>(records: I) -> Result<Self, MalformedDrawError>
    where
        I: IntoIterator<Item = (u32, Vec<u8>)>,
    {
        let draws = records
            .into_iter()
            .map(|(contest_id, numbers)| Draw::new(contest_id, &numbers))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_draws(draws)
    }

    pub fn from_draws(mut draws: Vec<Draw>) -> Result<Self, MalformedDrawError> {
        draws.sort_by_key(|d| d.contest_id);
        if let Some(w) = draws.windows(2).find(|w| w[0].contest_id == w[1].contest_id) {
            return Err(MalformedDrawError::DuplicateContest {
                contest_id: w[0].contest_id,
            });
        }
        Ok(Self { draws: draws.into() })
    }

    /// Nouvel instantané contenant en plus `draw`.
    pub fn with_draw(&self, draw: Draw) -> Result<Self, MalformedDrawError> {
        let mut draws = self.draws.to_vec();
        draws.push(draw);
        Self::from_draws(draws)
    }

    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    pub fn last(&self) -> Option<&Draw> {
        self.draws.last()
    }

    /// Les `size` derniers tirages ; tout l'historique si `size` vaut 0,
    /// est absent ou dépasse la longueur disponible.
    pub fn window(&self, size: Option<usize>) -> &[Draw] {
        match size {
            Some(w) if w > 0 && w < self.draws.len() => &self.draws[self.draws.len() - w..],
            _ => &self.draws,
        }
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub numbers: [u8; PICK_COUNT],
}

impl Suggestion {
    pub fn even_count(&self) -> usize {
        self.numbers.iter().filter(|&&n| n % 2 == 0).count()
    }

    pub fn prime_count(&self) -> usize {
        self.numbers.iter().filter(|n| PRIMES.contains(n)).count()
    }
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.numbers.iter().map(|n| format!("{:02}", n)).collect();
        write!(f, "{}", parts.join(" - "))
    }
}

/// Historique synthétique : le concours `i` contient 15 numéros consécutifs
/// (modulo 25) à partir de `i % 25 + 1`.
pub fn make_test_history(n: usize) -> DrawHistory {
    let records = (0..n).map(|i| {
        let start = i % POOL_SIZE;
        let numbers = (0..PICK_COUNT)
            .map(|k| ((start + k) % POOL_SIZE + 1) as u8)
            .collect();
        (i as u32 + 1, numbers)
    });
    match DrawHistory::new(records) {
        Ok(history) => history,
        Err(e) => unreachable!("historique de test invalide : {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(from: u8, to: u8) -> Vec<u8> {
        (from..=to).collect()
    }

    #[test]
    fn test_draw_ok_sorted() {
        let draw = Draw::new(7, &[15, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14]).unwrap();
        assert_eq!(draw.numbers(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
        assert!(draw.contains(15));
        assert!(!draw.contains(16));
    }

    #[test]
    fn test_draw_wrong_count() {
        let err = Draw::new(1, &range(1, 14)).unwrap_err();
        assert_eq!(err, MalformedDrawError::WrongCount { contest_id: 1, count: 14 });
        assert!(Draw::new(1, &range(1, 16)).is_err());
    }

    #[test]
    fn test_draw_out_of_range() {
        let mut numbers = range(1, 14);
        numbers.push(26);
        assert_eq!(
            Draw::new(3, &numbers).unwrap_err(),
            MalformedDrawError::OutOfRange { contest_id: 3, number: 26 }
        );
        let mut numbers = range(2, 15);
        numbers.push(0);
        assert!(Draw::new(3, &numbers).is_err());
    }

    #[test]
    fn test_draw_duplicate_number() {
        let mut numbers = range(1, 14);
        numbers.push(14);
        assert_eq!(
            Draw::new(9, &numbers).unwrap_err(),
            MalformedDrawError::DuplicateNumber { contest_id: 9, number: 14 }
        );
    }

    #[test]
    fn test_draw_overlap_and_complement() {
        let a = Draw::new(1, &range(1, 15)).unwrap();
        let b = Draw::new(2, &range(6, 20)).unwrap();
        assert_eq!(a.overlap(&b), 10);
        assert_eq!(a.complement(), range(16, 25));
    }

    #[test]
    fn test_history_sorted_by_contest() {
        let history = DrawHistory::new(vec![
            (3, range(1, 15)),
            (1, range(2, 16)),
            (2, range(3, 17)),
        ])
        .unwrap();
        let ids: Vec<u32> = history.draws().iter().map(|d| d.contest_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(history.last().unwrap().contest_id, 3);
    }

    #[test]
    fn test_history_duplicate_contest() {
        let err = DrawHistory::new(vec![(5, range(1, 15)), (5, range(2, 16))]).unwrap_err();
        assert_eq!(err, MalformedDrawError::DuplicateContest { contest_id: 5 });
    }

    #[test]
    fn test_history_window() {
        let history = make_test_history(10);
        assert_eq!(history.window(None).len(), 10);
        assert_eq!(history.window(Some(0)).len(), 10);
        assert_eq!(history.window(Some(50)).len(), 10);
        let w = history.window(Some(3));
        assert_eq!(w.len(), 3);
        assert_eq!(w[0].contest_id, 8);
        assert_eq!(w[2].contest_id, 10);
    }

    #[test]
    fn test_history_with_draw_is_new_snapshot() {
        let history = make_test_history(3);
        let draw = Draw::new(10, &range(5, 19)).unwrap();
        let updated = history.with_draw(draw).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(updated.len(), 4);
        assert_eq!(updated.last().unwrap().contest_id, 10);

        let clash = Draw::new(2, &range(5, 19)).unwrap();
        assert!(history.with_draw(clash).is_err());
    }

    #[test]
    fn test_empty_history() {
        let history = DrawHistory::new(Vec::new()).unwrap();
        assert!(history.is_empty());
        assert!(history.last().is_none());
        assert!(history.window(Some(5)).is_empty());
    }

    #[test]
    fn test_pool_sizes() {
        assert_eq!(Pool::All.size(), 25);
        assert_eq!(Pool::Evens.size(), 12);
        assert_eq!(Pool::Odds.size(), 13);
        assert_eq!(Pool::Primes.size(), 9);
        assert_eq!(Pool::CompositesAndOne.size(), 16);
    }

    #[test]
    fn test_suggestion_display() {
        let s = Suggestion {
            numbers: [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
        };
        assert!(s.to_string().starts_with("01 - 02"));
        assert_eq!(s.even_count(), 7);
        assert_eq!(s.prime_count(), 6);
    }
}
