use super::{evaluate, is_blank, Rule, RuleContext};
use crate::domain::model::{ShipmentRecord, ValidationResult};
use crate::domain::ports::{DateParser, RecordValidator};
use chrono::{Datelike, NaiveDateTime, Weekday};
use std::sync::Arc;

pub const SHIPMENT_ID_PREFIX: &str = "S-";
pub const REGIONS: &[&str] = &["North", "South", "East", "West"];
pub const LOAD_TYPES: &[&str] = &["Fragile", "Bulk", "Liquid"];

const RULES: &[Rule] = &[
    shipment_id_prefixed,
    region_known,
    destination_present,
    date_parses,
    date_on_weekday,
    load_type_known,
];

fn one_of(value: &str, allowed: &[&str]) -> bool {
    allowed.iter().any(|a| a.eq_ignore_ascii_case(value))
}

fn shipment_id_prefixed(record: &ShipmentRecord, _: &RuleContext<'_>) -> Option<String> {
    let id = &record.shipment_id;
    (is_blank(id) || !id.starts_with(SHIPMENT_ID_PREFIX))
        .then(|| format!("Invalid ShipmentId: {}", id))
}

fn region_known(record: &ShipmentRecord, _: &RuleContext<'_>) -> Option<String> {
    (!one_of(&record.region, REGIONS)).then(|| format!("Invalid region: {}", record.region))
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

fn date_on_weekday(record: &ShipmentRecord, ctx: &RuleContext<'_>) -> Option<String> {
    let shipped = ctx.dates.parse(&record.date)?;
    matches!(shipped.weekday(), Weekday::Sat | Weekday::Sun).then(|| {
        format!(
            "Date cannot be a weekend: {}",
            shipped.format("%Y-%m-%d")
        )
    })
}

fn load_type_known(record: &ShipmentRecord, _: &RuleContext<'_>) -> Option<String> {
    (!one_of(&record.load_type, LOAD_TYPES))
        .then(|| format!("Invalid load type: {}", record.load_type))
}

/// Pipe-delimited warehouse: `S-` ids, known regions and load types, weekday dates.
pub struct SouthValidator {
    dates: Arc<dyn DateParser>,
}

impl SouthValidator {
    pub fn new(dates: Arc<dyn DateParser>) -> Self {
        Self { dates }
    }
}

impl RecordValidator for SouthValidator {
    fn validate(&self, records: &[ShipmentRecord], now: NaiveDateTime) -> ValidationResult {
        let ctx = RuleContext {
            now,
            dates: self.dates.as_ref(),
        };
        evaluate(records, RULES, &ctx)
    }
}
