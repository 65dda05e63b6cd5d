pub mod composition;
pub mod cooccurrence;
pub mod frequency;
pub mod overdue;
pub mod repeats;
pub mod sequences;
pub mod trend;

pub use composition::{
    classify_parity, classify_primality, composition_by_draw, is_even, is_prime, DrawComposition,
    ParityCount, PrimeCount,
};
pub use cooccurrence::{compute_pair_frequencies, compute_triple_frequencies, CooccurrenceTable};
pub use frequency::{compute_frequency, FrequencyTable};
pub use overdue::{compute_overdue, OverdueTable};
pub use repeats::{compute_repeats, RepeatRecord};
