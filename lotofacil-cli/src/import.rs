use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::warn;

use lotofacil_core::models::{Draw, DrawHistory, PICK_COUNT};

const CONTEST_COLUMN: &str = "Concurso";

pub struct ImportResult {
    pub history: DrawHistory,
    pub total_records: u32,
    pub errors: u32,
}

/// Positions des colonnes `Concurso` et `Dezena1`..`Dezena15` dans l'en-tête.
struct Columns {
    contest: usize,
    numbers: [usize; PICK_COUNT],
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .with_context(|| format!("Colonne '{}' absente de l'en-tête", name))
        };

        let contest = find(CONTEST_COLUMN)?;
        let mut numbers = [0usize; PICK_COUNT];
        for (i, slot) in numbers.iter_mut().enumerate() {
            *slot = find(&format!("Dezena{}", i + 1))?;
        }
        Ok(Self { contest, numbers })
    }
}

fn parse_record(record: &csv::StringRecord, columns: &Columns) -> Result<Draw> {
    let get = |idx: usize| -> Result<String> {
        record
            .get(idx)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("Champ manquant à l'index {}", idx))
    };

    let raw_contest = get(columns.contest)?;
    let contest_id: u32 = raw_contest
        .parse()
        .with_context(|| format!("Numéro de concours invalide : '{}'", raw_contest))?;

    let numbers = columns
        .numbers
        .iter()
        .map(|&idx| {
            let s = get(idx)?;
            s.parse::<u8>()
                .with_context(|| format!("Impossible de parser '{}' (index {})", s, idx))
        })
        .collect::<Result<Vec<u8>>>()?;

    Ok(Draw::new(contest_id, &numbers)?)
}

/// Lit les tirages depuis un CSV ; les lignes invalides sont comptées et ignorées.
pub fn read_draws<R: Read>(reader: R) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().context("En-tête CSV illisible")?.clone();
    let columns = Columns::locate(&headers)?;

    let mut draws = Vec::new();
    let mut total_records = 0;
    let mut errors = 0;

    for record_result in reader.records() {
        total_records += 1;
        let parsed = record_result
            .context("Erreur de lecture")
            .and_then(|record| parse_record(&record, &columns));
        match parsed {
            Ok(draw) => draws.push(draw),
            Err(e) => {
                warn!("Ligne {} ignorée : {:#}", total_records, e);
                errors += 1;
            }
        }
    }

    if draws.is_empty() && total_records > 0 {
        bail!("Aucun tirage valide sur {} lignes", total_records);
    }

    let history = DrawHistory::from_draws(draws)?;
    Ok(ImportResult {
        history,
        total_records,
        errors,
    })
}

pub fn import_csv(path: &Path) -> Result<ImportResult> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;
    read_draws(file)
}
