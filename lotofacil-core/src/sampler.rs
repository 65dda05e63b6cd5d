use log::debug;
use rand::distr::weighted::WeightedIndex;
use rand::prelude::Distribution;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::analysis::{FrequencyTable, OverdueTable};
use crate::models::{Draw, Pool, Suggestion, PICK_COUNT, POOL_SIZE};

/// Tirages pondérés autorisés avant la complétion uniforme.
pub const MAX_ATTEMPTS: usize = PICK_COUNT * 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quota {
    Evens,
    Odds,
    Primes,
    Composites,
    Repeated,
    Fresh,
}

impl std::fmt::Display for Quota {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quota::Evens => write!(f, "pairs"),
            Quota::Odds => write!(f, "impairs"),
            Quota::Primes => write!(f, "premiers"),
            Quota::Composites => write!(f, "non premiers"),
            Quota::Repeated => write!(f, "repris du dernier tirage"),
            Quota::Fresh => write!(f, "absents du dernier tirage"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintInfeasible {
    #[error("Les quotas totalisent {requested} numéros au lieu de 15")]
    QuotaSum { requested: usize },
    #[error("Quota {quota} : {requested} demandés, le réservoir n'en contient que {available}")]
    QuotaExceedsPool {
        quota: Quota,
        requested: usize,
        available: usize,
    },
    #[error("Top {top_n} des retards impossible : seulement {available} numéros")]
    TopNOutOfRange { top_n: usize, available: usize },
}

/// Règle de génération d'une grille.
#[derive(Debug, Clone, Copy)]
pub enum Policy<'a> {
    FrequencyWeighted(&'a FrequencyTable),
    ParityQuota { evens: usize, odds: usize },
    PrimeQuota { primes: usize },
    OverdueBased { table: &'a OverdueTable, top_n: Option<usize> },
    RepeatBased { last_draw: &'a Draw, repeat: usize },
}

pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Répétition « standard » : 10 ou 11 numéros repris du dernier tirage.
pub fn default_repeat<R: Rng + ?Sized>(rng: &mut R) -> usize {
    if rng.random_bool(0.5) {
        10
    } else {
        11
    }
}

/// Génère une grille de 15 numéros distincts, triés, respectant `policy`.
pub fn generate<R: Rng + ?Sized>(
    policy: &Policy<'_>,
    rng: &mut R,
) -> Result<Suggestion, ConstraintInfeasible> {
    let picks = match *policy {
        Policy::FrequencyWeighted(table) => weighted_accumulate(table.weights(), rng),
        Policy::ParityQuota { evens, odds } => {
            if evens + odds != PICK_COUNT {
                return Err(ConstraintInfeasible::QuotaSum {
                    requested: evens + odds,
                });
            }
            let mut picks = pick_uniform(Pool::Evens.numbers(), evens, Quota::Evens, rng)?;
            picks.extend(pick_uniform(Pool::Odds.numbers(), odds, Quota::Odds, rng)?);
            picks
        }
        Policy::PrimeQuota { primes } => {
            let available = Pool::Primes.size();
            if primes > available {
                return Err(ConstraintInfeasible::QuotaExceedsPool {
                    quota: Quota::Primes,
                    requested: primes,
                    available,
                });
            }
            let mut picks = pick_uniform(Pool::Primes.numbers(), primes, Quota::Primes, rng)?;
            picks.extend(pick_uniform(
                Pool::CompositesAndOne.numbers(),
                PICK_COUNT - primes,
                Quota::Composites,
                rng,
            )?);
            picks
        }
        Policy::OverdueBased { table, top_n } => match top_n {
            Some(n) if n >= PICK_COUNT => {
                if n > POOL_SIZE {
                    return Err(ConstraintInfeasible::TopNOutOfRange {
                        top_n: n,
                        available: POOL_SIZE,
                    });
                }
                let population: Vec<u8> = table.ranked().iter().take(n).map(|&(num, _)| num).collect();
                population.choose_multiple(rng, PICK_COUNT).copied().collect()
            }
            _ => weighted_accumulate(&overdue_weights(table), rng),
        },
        Policy::RepeatBased { last_draw, repeat } => {
            let last = last_draw.numbers();
            let max_repeat = PICK_COUNT.min(last.len());
            if repeat > max_repeat {
                return Err(ConstraintInfeasible::QuotaExceedsPool {
                    quota: Quota::Repeated,
                    requested: repeat,
                    available: max_repeat,
                });
            }
            let complement = last_draw.complement();
            let mut picks = pick_uniform(last, repeat, Quota::Repeated, rng)?;
            picks.extend(pick_uniform(&complement, PICK_COUNT - repeat, Quota::Fresh, rng)?);
            picks
        }
    };

    Ok(into_suggestion(picks))
}

pub fn generate_many<R: Rng + ?Sized>(
    policy: &Policy<'_>,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Suggestion>, ConstraintInfeasible> {
    (0..count).map(|_| generate(policy, rng)).collect()
}

/// Poids strictement positifs : décalage de `1 - min` si le minimum est nul.
fn overdue_weights(table: &OverdueTable) -> [u32; POOL_SIZE] {
    let mut weights = *table.delays();
    let min = weights.iter().copied().min().unwrap_or(0);
    if min == 0 {
        for w in &mut weights {
            *w += 1;
        }
    }
    weights
}

/// Tirages avec remise selon `weights` (index = numéro - 1) jusqu'à 15
/// numéros distincts, dans la limite de `MAX_ATTEMPTS` tirages ; le reste est
/// complété uniformément parmi les numéros non retenus.
fn weighted_accumulate<R: Rng + ?Sized>(weights: &[u32; POOL_SIZE], rng: &mut R) -> Vec<u8> {
    let mut chosen = [false; POOL_SIZE];
    let mut picked = 0;

    if let Ok(dist) = WeightedIndex::new(weights) {
        let mut attempts = 0;
        while picked < PICK_COUNT && attempts < MAX_ATTEMPTS {
            let idx = dist.sample(rng);
            if !chosen[idx] {
                chosen[idx] = true;
                picked += 1;
            }
            attempts += 1;
        }
    }

    if picked < PICK_COUNT {
        debug!(
            "Plafond de {} tirages pondérés atteint : complétion uniforme de {} numéros",
            MAX_ATTEMPTS,
            PICK_COUNT - picked
        );
        let remaining: Vec<usize> = (0..POOL_SIZE).filter(|&i| !chosen[i]).collect();
        for &idx in remaining.choose_multiple(rng, PICK_COUNT - picked) {
            chosen[idx] = true;
        }
    }

    chosen
        .iter()
        .enumerate()
        .filter(|(_, c)| **c)
        .map(|(i, _)| (i + 1) as u8)
        .collect()
}

fn pick_uniform<R: Rng + ?Sized>(
    pool: &[u8],
    count: usize,
    quota: Quota,
    rng: &mut R,
) -> Result<Vec<u8>, ConstraintInfeasible> {
    if count > pool.len() {
        return Err(ConstraintInfeasible::QuotaExceedsPool {
            quota,
            requested: count,
            available: pool.len(),
        });
    }
    Ok(pool.choose_multiple(rng, count).copied().collect())
}

fn into_suggestion(mut picks: Vec<u8>) -> Suggestion {
    picks.sort_unstable();
    debug_assert_eq!(picks.len(), PICK_COUNT);
    let mut numbers = [0u8; PICK_COUNT];
    for (slot, n) in numbers.iter_mut().zip(picks) {
        *slot = n;
    }
    Suggestion { numbers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{compute_frequency, compute_overdue, is_even, is_prime};
    use crate::models::{make_test_history, DrawHistory};

    fn assert_valid(s: &Suggestion) {
        assert!(s.numbers.iter().all(|&n| (1..=25).contains(&n)), "{:?}", s.numbers);
        assert!(s.numbers.windows(2).all(|w| w[0] < w[1]), "non trié / doublon : {:?}", s.numbers);
    }

    #[test]
    fn test_frequency_weighted_valid() {
        let history = make_test_history(30);
        let table = compute_frequency(&history);
        let policy = Policy::FrequencyWeighted(&table);
        for seed in 0..50 {
            let s = generate(&policy, &mut rng_from_seed(Some(seed))).unwrap();
            assert_valid(&s);
        }
    }

    #[test]
    fn test_frequency_weighted_reproducible() {
        let history = make_test_history(30);
        let table = compute_frequency(&history);
        let policy = Policy::FrequencyWeighted(&table);
        let a = generate_many(&policy, 5, &mut rng_from_seed(Some(42))).unwrap();
        let b = generate_many(&policy, 5, &mut rng_from_seed(Some(42))).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn test_frequency_weighted_degenerate_weights() {
        // Tout le poids sur un seul numéro : la complétion uniforme termine la grille.
        let history = DrawHistory::new(vec![(1, (1..=15).collect())]).unwrap();
        let table = compute_frequency(&history);
        let mut weights = *table.weights();
        for w in weights.iter_mut().skip(1) {
            *w = 0;
        }
        let picks = weighted_accumulate(&weights, &mut rng_from_seed(Some(3)));
        assert_eq!(picks.len(), 15);
        assert!(picks.contains(&1));

        // Tables vides : aucun poids, complétion uniforme directe.
        let empty = compute_frequency(&DrawHistory::default());
        let s = generate(&Policy::FrequencyWeighted(&empty), &mut rng_from_seed(Some(3))).unwrap();
        assert_valid(&s);
    }

    #[test]
    fn test_weighted_accumulate_partial_support() {
        // 15 numéros de poids 1, 10 de poids nul
        let mut weights = [0u32; POOL_SIZE];
        for w in weights.iter_mut().take(15) {
            *w = 1;
        }
        for seed in 0..20 {
            let picks = weighted_accumulate(&weights, &mut rng_from_seed(Some(seed)));
            assert_eq!(picks.len(), 15);
        }
    }

    #[test]
    fn test_parity_quota() {
        let policy = Policy::ParityQuota { evens: 7, odds: 8 };
        for seed in 0..50 {
            let s = generate(&policy, &mut rng_from_seed(Some(seed))).unwrap();
            assert_valid(&s);
            assert_eq!(s.numbers.iter().filter(|&&n| is_even(n)).count(), 7);
            assert_eq!(s.numbers.iter().filter(|&&n| !is_even(n)).count(), 8);
        }
    }

    #[test]
    fn test_parity_quota_limits() {
        let mut rng = rng_from_seed(Some(1));
        let s = generate(&Policy::ParityQuota { evens: 12, odds: 3 }, &mut rng).unwrap();
        assert_eq!(s.even_count(), 12);
        let s = generate(&Policy::ParityQuota { evens: 2, odds: 13 }, &mut rng).unwrap();
        assert_eq!(s.even_count(), 2);

        assert_eq!(
            generate(&Policy::ParityQuota { evens: 7, odds: 7 }, &mut rng).unwrap_err(),
            ConstraintInfeasible::QuotaSum { requested: 14 }
        );
        assert_eq!(
            generate(&Policy::ParityQuota { evens: 1, odds: 14 }, &mut rng).unwrap_err(),
            ConstraintInfeasible::QuotaExceedsPool {
                quota: Quota::Odds,
                requested: 14,
                available: 13
            }
        );
        assert!(matches!(
            generate(&Policy::ParityQuota { evens: 13, odds: 2 }, &mut rng),
            Err(ConstraintInfeasible::QuotaExceedsPool { quota: Quota::Evens, .. })
        ));
    }

    #[test]
    fn test_prime_quota() {
        for primes in 0..=9 {
            let s = generate(&Policy::PrimeQuota { primes }, &mut rng_from_seed(Some(primes as u64))).unwrap();
            assert_valid(&s);
            assert_eq!(s.numbers.iter().filter(|&&n| is_prime(n)).count(), primes);
        }
    }

    #[test]
    fn test_prime_quota_infeasible() {
        let err = generate(&Policy::PrimeQuota { primes: 10 }, &mut rng_from_seed(Some(0))).unwrap_err();
        assert_eq!(
            err,
            ConstraintInfeasible::QuotaExceedsPool {
                quota: Quota::Primes,
                requested: 10,
                available: 9
            }
        );
        assert!(generate(&Policy::PrimeQuota { primes: 30 }, &mut rng_from_seed(Some(0))).is_err());
    }

    #[test]
    fn test_overdue_top_n() {
        let history = make_test_history(40);
        let table = compute_overdue(&history, Some(10));
        let top: Vec<u8> = table.ranked().iter().take(15).map(|&(n, _)| n).collect();
        let policy = Policy::OverdueBased { table: &table, top_n: Some(15) };
        let s = generate(&policy, &mut rng_from_seed(Some(9))).unwrap();
        let mut expected = top.clone();
        expected.sort_unstable();
        assert_eq!(s.numbers.to_vec(), expected);

        let policy = Policy::OverdueBased { table: &table, top_n: Some(18) };
        let allowed: Vec<u8> = table.ranked().iter().take(18).map(|&(n, _)| n).collect();
        for seed in 0..20 {
            let s = generate(&policy, &mut rng_from_seed(Some(seed))).unwrap();
            assert_valid(&s);
            assert!(s.numbers.iter().all(|n| allowed.contains(n)));
        }
    }

    #[test]
    fn test_overdue_weighted() {
        let history = make_test_history(40);
        let table = compute_overdue(&history, Some(5));
        for top_n in [None, Some(0), Some(14)] {
            let policy = Policy::OverdueBased { table: &table, top_n };
            for seed in 0..20 {
                assert_valid(&generate(&policy, &mut rng_from_seed(Some(seed))).unwrap());
            }
        }
    }

    #[test]
    fn test_overdue_weights_shifted() {
        let history = make_test_history(3);
        let table = compute_overdue(&history, None);
        let weights = overdue_weights(&table);
        assert!(weights.iter().all(|&w| w > 0));
        assert_eq!(weights[0], table.get(1) + 1);
    }

    #[test]
    fn test_overdue_top_n_too_large() {
        let table = compute_overdue(&make_test_history(5), None);
        let err = generate(
            &Policy::OverdueBased { table: &table, top_n: Some(26) },
            &mut rng_from_seed(Some(0)),
        )
        .unwrap_err();
        assert_eq!(err, ConstraintInfeasible::TopNOutOfRange { top_n: 26, available: 25 });
    }

    #[test]
    fn test_repeat_based() {
        let history = make_test_history(4);
        let last = history.last().unwrap();
        for repeat in 5..=15 {
            let policy = Policy::RepeatBased { last_draw: last, repeat };
            let s = generate(&policy, &mut rng_from_seed(Some(repeat as u64))).unwrap();
            assert_valid(&s);
            assert_eq!(s.numbers.iter().filter(|&&n| last.contains(n)).count(), repeat);
        }
    }

    #[test]
    fn test_repeat_based_infeasible() {
        let history = make_test_history(2);
        let last = history.last().unwrap();
        let mut rng = rng_from_seed(Some(0));
        assert_eq!(
            generate(&Policy::RepeatBased { last_draw: last, repeat: 16 }, &mut rng).unwrap_err(),
            ConstraintInfeasible::QuotaExceedsPool {
                quota: Quota::Repeated,
                requested: 16,
                available: 15
            }
        );
        // 11 nouveaux numéros demandés pour 10 disponibles
        assert_eq!(
            generate(&Policy::RepeatBased { last_draw: last, repeat: 4 }, &mut rng).unwrap_err(),
            ConstraintInfeasible::QuotaExceedsPool {
                quota: Quota::Fresh,
                requested: 11,
                available: 10
            }
        );
    }

    #[test]
    fn test_default_repeat() {
        let mut rng = rng_from_seed(Some(5));
        for _ in 0..20 {
            let r = default_repeat(&mut rng);
            assert!(r == 10 || r == 11);
        }
    }

    #[test]
    fn test_generate_many_propagates_errors() {
        let mut rng = rng_from_seed(Some(0));
        assert!(generate_many(&Policy::PrimeQuota { primes: 10 }, 3, &mut rng).is_err());
        assert!(generate_many(&Policy::PrimeQuota { primes: 4 }, 0, &mut rng).unwrap().is_empty());
    }
}
