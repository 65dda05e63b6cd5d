use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::import::ImportResult;
use lotofacil_core::analysis::composition::{DrawComposition, PrimeFitTest};
use lotofacil_core::analysis::frequency::FrequencySummary;
use lotofacil_core::analysis::trend::TrendPoint;
use lotofacil_core::analysis::{FrequencyTable, OverdueTable, RepeatRecord};
use lotofacil_core::models::Suggestion;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Chargement terminé :");
    println!("  Lignes lues : {}", result.total_records);
    println!("  Tirages     : {}", result.history.len());
    if result.errors > 0 {
        println!("  Erreurs     : {}", result.errors);
    }
}

pub fn display_frequency(table: &FrequencyTable, summary: &FrequencySummary, draw_count: usize) {
    println!("\n📊 Fréquences sur {} tirages\n", draw_count);
    println!(
        "Moyenne : {:.2}   Médiane : {:.2}   Écart-type : {:.2}",
        summary.mean, summary.median, summary.std_dev
    );

    let mut out = new_table(vec!["Numéro", "Fréquence", "Écart à la moyenne"]);
    for (number, count) in table.ranked() {
        let deviation = count as f64 - summary.mean;
        let color = if deviation > summary.std_dev {
            Color::Green
        } else if deviation < -summary.std_dev {
            Color::Red
        } else {
            Color::White
        };
        out.add_row(vec![
            Cell::new(format!("{:2}", number)),
            Cell::new(count.to_string()),
            Cell::new(format!("{:+.2}", deviation)).fg(color),
        ]);
    }
    println!("{out}");
}

pub fn display_overdue(table: &OverdueTable) {
    println!("\n⏳ Retards sur les {} derniers tirages\n", table.window_len());

    let mut out = new_table(vec!["Numéro", "Retard"]);
    for (number, delay) in table.ranked() {
        out.add_row(vec![format!("{:2}", number), delay.to_string()]);
    }
    println!("{out}");
}

pub fn display_composition(
    compositions: &[DrawComposition],
    even_dist: &[u32],
    prime_dist: &[u32],
    fit: Option<&PrimeFitTest>,
    last: usize,
) {
    println!("\n── Pairs / premiers par concours ({} derniers) ──", last);
    let mut out = new_table(vec!["Concours", "Pairs", "Impairs", "Premiers", "Non premiers"]);
    let start = compositions.len().saturating_sub(last);
    for c in &compositions[start..] {
        out.add_row(vec![
            c.contest_id.to_string(),
            c.parity.even.to_string(),
            c.parity.odd.to_string(),
            c.primality.prime.to_string(),
            c.primality.composite.to_string(),
        ]);
    }
    println!("{out}");

    println!("\n── Distribution ──");
    let mut out = new_table(vec!["k", "Tirages avec k pairs", "Tirages avec k premiers"]);
    for (k, (e, p)) in even_dist.iter().zip(prime_dist).enumerate() {
        if *e > 0 || *p > 0 {
            out.add_row(vec![k.to_string(), e.to_string(), p.to_string()]);
        }
    }
    println!("{out}");

    if let Some(fit) = fit {
        println!(
            "\nPremiers tirés : {} (attendu {:.1})   Non premiers : {} (attendu {:.1})",
            fit.observed.prime, fit.expected_prime, fit.observed.composite, fit.expected_composite
        );
        println!("Khi-deux : {:.2}, p-value : {:.3}", fit.chi_square, fit.p_value);
    }
}

pub fn display_repeats(records: &[RepeatRecord], distribution: &[u32], typical: Option<usize>, last: usize) {
    if records.is_empty() {
        println!("Au moins deux tirages sont nécessaires.");
        return;
    }

    println!("\n🔁 Numéros repris du tirage précédent ({} derniers)\n", last);
    let mut out = new_table(vec!["Concours", "Repris"]);
    let start = records.len().saturating_sub(last);
    for r in &records[start..] {
        out.add_row(vec![r.contest_id.to_string(), r.repeated.to_string()]);
    }
    println!("{out}");

    let mut out = new_table(vec!["Repris", "Tirages"]);
    for (k, count) in distribution.iter().enumerate().filter(|&(_, &c)| c > 0) {
        out.add_row(vec![k.to_string(), count.to_string()]);
    }
    println!("{out}");

    if let Some(k) = typical {
        println!("Reprise la plus fréquente : {}", k);
    }
}

pub fn display_combinations(title: &str, entries: &[(Vec<u8>, u32)]) {
    println!("\n── {} ──", title);
    if entries.is_empty() {
        println!("Aucune combinaison.");
        return;
    }

    let mut out = new_table(vec!["#", "Numéros", "Fréquence"]);
    for (i, (numbers, count)) in entries.iter().enumerate() {
        out.add_row(vec![(i + 1).to_string(), join_numbers(numbers), count.to_string()]);
    }
    println!("{out}");
}

pub fn display_trend(number: u8, window: usize, points: &[TrendPoint], last: usize) {
    println!("\n📈 Moyenne mobile ({}) de présence du {}\n", window, number);

    let mut out = new_table(vec!["Concours", "Taux"]);
    let start = points.len().saturating_sub(last);
    for p in &points[start..] {
        let rate = p.rate.map(|r| format!("{:.3}", r)).unwrap_or_else(|| "—".to_string());
        out.add_row(vec![p.contest_id.to_string(), rate]);
    }
    println!("{out}");
}

pub fn display_suggestions(suggestions: &[Suggestion], policy_name: &str) {
    println!("\n🎲 Jeux générés ({})\n", policy_name);

    let mut out = new_table(vec!["#", "Numéros", "Pairs", "Premiers"]);
    for (i, s) in suggestions.iter().enumerate() {
        out.add_row(vec![
            (i + 1).to_string(),
            join_numbers(&s.numbers),
            s.even_count().to_string(),
            s.prime_count().to_string(),
        ]);
    }
    println!("{out}");
}
