use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::models::{Draw, DrawHistory, PICK_COUNT, POOL_SIZE, PRIMES};

const IS_PRIME: [bool; POOL_SIZE + 1] = {
    let mut table = [false; POOL_SIZE + 1];
    let mut i = 0;
    while i < PRIMES.len() {
        table[PRIMES[i] as usize] = true;
        i += 1;
    }
    table
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParityCount {
    pub even: usize,
    pub odd: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrimeCount {
    pub prime: usize,
    pub composite: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrawComposition {
    pub contest_id: u32,
    pub parity: ParityCount,
    pub primality: PrimeCount,
}

/// Test du khi-deux (1 ddl) : proportion de premiers tirés contre 9/25.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrimeFitTest {
    pub observed: PrimeCount,
    pub expected_prime: f64,
    pub expected_composite: f64,
    pub chi_square: f64,
    pub p_value: f64,
}

pub fn is_even(number: u8) -> bool {
    number % 2 == 0
}

pub fn is_prime(number: u8) -> bool {
    IS_PRIME.get(number as usize).copied().unwrap_or(false)
}

pub fn classify_parity(draw: &Draw) -> ParityCount {
    let even = draw.numbers().iter().filter(|&&n| is_even(n)).count();
    ParityCount {
        even,
        odd: PICK_COUNT - even,
    }
}

pub fn classify_primality(draw: &Draw) -> PrimeCount {
    let prime = draw.numbers().iter().filter(|&&n| is_prime(n)).count();
    PrimeCount {
        prime,
        composite: PICK_COUNT - prime,
    }
}

pub fn composition_by_draw(history: &DrawHistory) -> Vec<DrawComposition> {
    history
        .draws()
        .iter()
        .map(|d| DrawComposition {
            contest_id: d.contest_id,
            parity: classify_parity(d),
            primality: classify_primality(d),
        })
        .collect()
}

pub fn parity_totals(history: &DrawHistory) -> ParityCount {
    history
        .draws()
        .iter()
        .map(classify_parity)
        .fold(ParityCount { even: 0, odd: 0 }, |acc, p| ParityCount {
            even: acc.even + p.even,
            odd: acc.odd + p.odd,
        })
}

pub fn prime_totals(history: &DrawHistory) -> PrimeCount {
    history
        .draws()
        .iter()
        .map(classify_primality)
        .fold(PrimeCount { prime: 0, composite: 0 }, |acc, p| PrimeCount {
            prime: acc.prime + p.prime,
            composite: acc.composite + p.composite,
        })
}

/// Histogrammes `[k] = nombre de tirages avec k pairs` et
/// `[k] = nombre de tirages avec k premiers`.
pub fn composition_distribution(
    compositions: &[DrawComposition],
) -> ([u32; PICK_COUNT + 1], [u32; PICK_COUNT + 1]) {
    let mut evens = [0u32; PICK_COUNT + 1];
    let mut primes = [0u32; PICK_COUNT + 1];
    for c in compositions {
        evens[c.parity.even] += 1;
        primes[c.primality.prime] += 1;
    }
    (evens, primes)
}

pub fn prime_goodness_of_fit(history: &DrawHistory) -> Option<PrimeFitTest> {
    if history.is_empty() {
        return None;
    }

    let observed = prime_totals(history);
    let total = (observed.prime + observed.composite) as f64;
    let expected_prime = total * PRIMES.len() as f64 / POOL_SIZE as f64;
    let expected_composite = total - expected_prime;

    let chi_square = (observed.prime as f64 - expected_prime).powi(2) / expected_prime
        + (observed.composite as f64 - expected_composite).powi(2) / expected_composite;

    let p_value = ChiSquared::new(1.0).ok()?.sf(chi_square);

    Some(PrimeFitTest {
        observed,
        expected_prime,
        expected_composite,
        chi_square,
        p_value,
    })
}
