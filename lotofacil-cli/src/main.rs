mod config;
mod display;
mod import;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use crate::config::{load_config, AppConfig};
use crate::display::{
    display_combinations, display_composition, display_frequency, display_import_summary,
    display_overdue, display_repeats, display_suggestions, display_trend,
};
use crate::import::import_csv;
use lotofacil_core::analysis::composition::{composition_distribution, prime_goodness_of_fit};
use lotofacil_core::analysis::repeats::{repeat_distribution, typical_repeat};
use lotofacil_core::analysis::sequences::consecutive_runs;
use lotofacil_core::analysis::trend::presence_moving_average;
use lotofacil_core::analysis::{
    composition_by_draw, compute_frequency, compute_overdue, compute_pair_frequencies,
    compute_repeats, compute_triple_frequencies,
};
use lotofacil_core::models::{DrawHistory, PICK_COUNT};
use lotofacil_core::sampler::{default_repeat, generate_many, rng_from_seed, Policy};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyKind {
    Frequency,
    Parity,
    Prime,
    Overdue,
    Repeat,
}

#[derive(Parser)]
#[command(name = "lotofacil", about = "Statistiques et générateur de jeux Lotofácil")]
struct Cli {
    /// Fichier CSV des résultats (colonnes Concurso, Dezena1..Dezena15)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Fichier de configuration JSON
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fréquences et retards
    Stats {
        /// Fenêtre des retards (0 = tout l'historique)
        #[arg(short, long)]
        window: Option<usize>,
    },

    /// Pairs / impairs et premiers par concours
    Composition {
        /// Nombre de concours affichés
        #[arg(short, long, default_value = "20")]
        last: usize,
    },

    /// Numéros repris du concours précédent
    Repeats {
        #[arg(short, long, default_value = "20")]
        last: usize,
    },

    /// Paires les plus fréquentes
    Pairs {
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Triplets les plus fréquents
    Triples {
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Séquences de numéros consécutifs
    Sequences {
        #[arg(short, long, default_value = "3")]
        length: usize,

        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Moyenne mobile de présence d'un numéro
    Trend {
        #[arg(short, long)]
        number: u8,

        #[arg(short, long)]
        window: Option<usize>,

        #[arg(short, long, default_value = "20")]
        last: usize,
    },

    /// Générer des jeux selon une politique
    Generate {
        #[arg(short, long, default_value = "frequency")]
        policy: PolicyKind,

        /// Nombre de jeux
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Politique parity : nombre de pairs
        #[arg(long, default_value = "7")]
        evens: usize,

        /// Politique parity : nombre d'impairs (défaut : 15 - pairs)
        #[arg(long)]
        odds: Option<usize>,

        /// Politique prime : nombre de premiers
        #[arg(long, default_value = "5")]
        primes: usize,

        /// Politique overdue : fenêtre des retards (0 = tout l'historique)
        #[arg(short, long)]
        window: Option<usize>,

        /// Politique overdue : tirer parmi les N plus en retard (N >= 15)
        #[arg(long)]
        top_n: Option<usize>,

        /// Politique repeat : numéros repris du dernier tirage (défaut : 10 ou 11)
        #[arg(long)]
        repeat: Option<usize>,

        /// Sortie JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    let file = cli.file.clone().unwrap_or_else(|| config.data_file.clone());

    let result = import_csv(&file)?;
    info!("{} tirages chargés depuis {:?}", result.history.len(), file);
    let history = result.history.clone();

    match cli.command {
        Command::Stats { window } => {
            display_import_summary(&result);
            cmd_stats(&history, window.unwrap_or(config.overdue_window))
        }
        Command::Composition { last } => cmd_composition(&history, last),
        Command::Repeats { last } => cmd_repeats(&history, last),
        Command::Pairs { top } => {
            let top = compute_pair_frequencies(&history).top_k(top.unwrap_or(config.top_k));
            let entries: Vec<(Vec<u8>, u32)> = top.iter().map(|(k, c)| (k.to_vec(), *c)).collect();
            display_combinations("Paires les plus fréquentes", &entries);
            Ok(())
        }
        Command::Triples { top } => {
            let top = compute_triple_frequencies(&history).top_k(top.unwrap_or(config.top_k));
            let entries: Vec<(Vec<u8>, u32)> = top.iter().map(|(k, c)| (k.to_vec(), *c)).collect();
            display_combinations("Triplets les plus fréquents", &entries);
            Ok(())
        }
        Command::Sequences { length, top } => {
            let mut runs = consecutive_runs(&history, length);
            runs.truncate(top.unwrap_or(config.top_k));
            display_combinations(&format!("Séquences de {} numéros consécutifs", length), &runs);
            Ok(())
        }
        Command::Trend { number, window, last } => {
            if !(1..=25).contains(&number) {
                bail!("Numéro {} hors limites (1-25)", number);
            }
            let window = window.unwrap_or(config.trend_window);
            let points = presence_moving_average(&history, number, window);
            display_trend(number, window, &points, last);
            Ok(())
        }
        Command::Generate {
            policy,
            count,
            seed,
            evens,
            odds,
            primes,
            window,
            top_n,
            repeat,
            json,
        } => {
            let options = GenerateOptions {
                count: count.unwrap_or(config.games),
                seed,
                evens,
                odds: odds.unwrap_or(PICK_COUNT.saturating_sub(evens)),
                primes,
                window: window.unwrap_or(config.overdue_window),
                top_n,
                repeat,
                json,
            };
            cmd_generate(&history, policy, &options)
        }
    }
}

fn cmd_stats(history: &DrawHistory, window: usize) -> Result<()> {
    let frequency = compute_frequency(history);
    display_frequency(&frequency, &frequency.summary(), history.len());

    let overdue = compute_overdue(history, Some(window));
    display_overdue(&overdue);
    Ok(())
}

fn cmd_composition(history: &DrawHistory, last: usize) -> Result<()> {
    let compositions = composition_by_draw(history);
    let (even_dist, prime_dist) = composition_distribution(&compositions);
    let fit = prime_goodness_of_fit(history);
    display_composition(&compositions, &even_dist, &prime_dist, fit.as_ref(), last);
    Ok(())
}

fn cmd_repeats(history: &DrawHistory, last: usize) -> Result<()> {
    let records = compute_repeats(history);
    let distribution = repeat_distribution(&records);
    display_repeats(&records, &distribution, typical_repeat(&records), last);
    Ok(())
}

struct GenerateOptions {
    count: usize,
    seed: Option<u64>,
    evens: usize,
    odds: usize,
    primes: usize,
    window: usize,
    top_n: Option<usize>,
    repeat: Option<usize>,
    json: bool,
}

fn cmd_generate(history: &DrawHistory, kind: PolicyKind, options: &GenerateOptions) -> Result<()> {
    let mut rng = rng_from_seed(options.seed);

    let frequency;
    let overdue;
    let (policy, policy_name) = match kind {
        PolicyKind::Frequency => {
            frequency = compute_frequency(history);
            (Policy::FrequencyWeighted(&frequency), "fréquence".to_string())
        }
        PolicyKind::Parity => (
            Policy::ParityQuota {
                evens: options.evens,
                odds: options.odds,
            },
            format!("{} pairs / {} impairs", options.evens, options.odds),
        ),
        PolicyKind::Prime => (
            Policy::PrimeQuota {
                primes: options.primes,
            },
            format!("{} premiers", options.primes),
        ),
        PolicyKind::Overdue => {
            overdue = compute_overdue(history, Some(options.window));
            let name = match options.top_n {
                Some(n) if n >= PICK_COUNT => format!("top {} des retards", n),
                _ => "pondéré par les retards".to_string(),
            };
            (
                Policy::OverdueBased {
                    table: &overdue,
                    top_n: options.top_n,
                },
                name,
            )
        }
        PolicyKind::Repeat => {
            let last_draw = history
                .last()
                .context("Aucun tirage : impossible de reprendre le dernier")?;
            let repeat = options.repeat.unwrap_or_else(|| default_repeat(&mut rng));
            (
                Policy::RepeatBased { last_draw, repeat },
                format!("{} repris du concours {}", repeat, last_draw.contest_id),
            )
        }
    };

    let suggestions = generate_many(&policy, options.count, &mut rng)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else {
        display_suggestions(&suggestions, &policy_name);
    }
    Ok(())
}
