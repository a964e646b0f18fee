use super::{evaluate, is_blank, Rule, RuleContext};
use crate::domain::model::{ShipmentRecord, ValidationResult};
use crate::domain::ports::{DateParser, RecordValidator};
use chrono::NaiveDateTime;
use std::sync::Arc;

const RULES: &[Rule] = &[
    shipment_id_alphanumeric,
    origin_present,
    destination_present,
    date_parses,
    date_not_in_future,
    weight_positive,
];

fn shipment_id_alphanumeric(record: &ShipmentRecord, _: &RuleContext<'_>) -> Option<String> {
    let id = &record.shipment_id;
    (is_blank(id) || !id.chars().all(char::is_alphanumeric))
        .then(|| format!("Invalid ShipmentId: {}", id))
}

fn origin_present(record: &ShipmentRecord, _: &RuleContext<'_>) -> Option<String> {
    is_blank(&record.origin).then(|| "Origin cannot be empty".to_string())
}

fn destination_present(record: &ShipmentRecord, _: &RuleContext<'_>) -> Option<String> {
    is_blank(&record.destination).then(|| "Destination cannot be empty".to_string())
}

fn date_parses(record: &ShipmentRecord, ctx: &RuleContext<'_>) -> Option<String> {
    ctx.dates
        .parse(&record.date)
        .is_none()
        .then(|| format!("Invalid date: {}", record.date))
}

fn date_not_in_future(record: &ShipmentRecord, ctx: &RuleContext<'_>) -> Option<String> {
    let shipped = ctx.dates.parse(&record.date)?;
    (shipped > ctx.now).then(|| format!("Date cannot be in the future: {}", record.date))
}

/// Plain decimal notation: optional sign, digits with optional thousands commas,
/// optional fraction. Exponents, hex and `NaN`/`inf` do not match.
fn parse_decimal(value: &str) -> Option<f64> {
    use regex::Regex;
    use std::sync::OnceLock;

    static DECIMAL: OnceLock<Regex> = OnceLock::new();
    let re = DECIMAL.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9][0-9,]*(?:\.[0-9]*)?|\.[0-9]+)$")
            .expect("static pattern compiles")
    });

    if !re.is_match(value) {
        return None;
    }
    value.replace(',', "").parse::<f64>().ok()
}

fn weight_positive(record: &ShipmentRecord, _: &RuleContext<'_>) -> Option<String> {
    let positive = parse_decimal(&record.weight)
        .map(|w| w.is_finite() && w > 0.0)
        .unwrap_or(false);
    (!positive).then(|| format!("Invalid weight: {}", record.weight))
}

/// Comma-delimited warehouse: alphanumeric ids, past dates, positive weights.
pub struct NorthValidator {
    dates: Arc<dyn DateParser>,
}

impl NorthValidator {
    pub fn new(dates: Arc<dyn DateParser>) -> Self {
        Self { dates }
    }
}

impl RecordValidator for NorthValidator {
    fn validate(&self, records: &[ShipmentRecord], now: NaiveDateTime) -> ValidationResult {
        let ctx = RuleContext {
            now,
            dates: self.dates.as_ref(),
        };
        evaluate(records, RULES, &ctx)
    }
}
