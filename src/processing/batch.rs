use crate::card_validator::CardValidator;
use crate::models::ValidationResult;
use crate::utils::{clean_card_id, contains_letter};
use log::{debug, info};
use serde::Serialize;
use std::num::NonZeroUsize;
use std::thread;

/// Counts gathered while verifying a batch of card ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub missing: usize,
    pub with_letters: usize,
    pub personal_id: usize,
    pub passport: usize,
    pub driver_license: usize,
    pub valid: usize,
}

/// One verified record: the cleaned id (if any) and its flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardRecord {
    pub card_id: Option<String>,
    #[serde(flatten)]
    pub result: ValidationResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub records: Vec<CardRecord>,
    pub summary: BatchSummary,
}

/// Half of the available cores, never fewer than one
pub fn default_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .map(|cores| (cores / 2).max(1))
        .unwrap_or(1)
}

/// Split off missing records and clean the rest.
///
/// Returns the cleaned ids paired with their position in the input.
fn extract_null_values(records: &[Option<String>]) -> (Vec<(usize, String)>, usize) {
    let mut clean = Vec::with_capacity(records.len());
    let mut missing = 0;

    for (index, record) in records.iter().enumerate() {
        let cleaned = record.as_deref().map(clean_card_id);
        match cleaned {
            Some(card_id) if !card_id.is_empty() => clean.push((index, card_id)),
            _ => missing += 1,
        }
    }

    (clean, missing)
}

fn validate_chunk(
    validator: &CardValidator,
    chunk: &[(usize, String)],
) -> Vec<(usize, ValidationResult)> {
    chunk
        .iter()
        .map(|(index, card_id)| {
            let result = validator.validate(card_id);
            debug!("{} -> {:?}", card_id, result.kinds());
            (*index, result)
        })
        .collect()
}

/// Verify a batch of raw card ids.
///
/// Missing or blank records never reach the validators and come back all
/// false. The others are cleaned, split across `workers` threads and merged
/// back in input order.
pub fn verify_cards(
    records: &[Option<String>],
    validator: &CardValidator,
    workers: usize,
) -> BatchReport {
    let (clean, missing) = extract_null_values(records);
    info!("# NAN CARD ID: {}", missing);

    let workers = workers.max(1);
    let chunk_size = clean.len().div_ceil(workers).max(1);

    let mut results = vec![ValidationResult::default(); records.len()];
    thread::scope(|scope| {
        let handles: Vec<_> = clean
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(move || validate_chunk(validator, chunk)))
            .collect();

        for handle in handles {
            match handle.join() {
                Ok(chunk_results) => {
                    for (index, result) in chunk_results {
                        results[index] = result;
                    }
                }
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
    });

    let mut cleaned_ids: Vec<Option<String>> = vec![None; records.len()];
    let mut with_letters = 0;
    for (index, card_id) in clean {
        if contains_letter(&card_id) {
            with_letters += 1;
        }
        cleaned_ids[index] = Some(card_id);
    }

    let summary = BatchSummary {
        total: records.len(),
        missing,
        with_letters,
        personal_id: results.iter().filter(|r| r.is_personal_id).count(),
        passport: results.iter().filter(|r| r.is_passport).count(),
        driver_license: results.iter().filter(|r| r.is_driver_license).count(),
        valid: results.iter().filter(|r| r.is_valid).count(),
    };

    info!("# PERSONAL ID FOUND: {}", summary.personal_id);
    info!("# PASSPORT FOUND: {}", summary.passport);
    info!("# DRIVER LICENSE FOUND: {}", summary.driver_license);
    info!("# VALID CARD ID: {}/{}", summary.valid, summary.total);

    let records = cleaned_ids
        .into_iter()
        .zip(results)
        .map(|(card_id, result)| CardRecord { card_id, result })
        .collect();

    BatchReport { records, summary }
}
