use crate::core::{RecordParser, ShipmentRecord};

/// Fields every shipment line must carry.
pub const FIELD_COUNT: usize = 5;

/// How the five positional fields map onto a [`ShipmentRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLayout {
    /// shipment id, origin, destination, date, weight
    OriginWeight,
    /// shipment id, region, destination, date, load type
    RegionLoadType,
}

impl FieldLayout {
    fn build(self, fields: [String; FIELD_COUNT]) -> ShipmentRecord {
        let [shipment_id, second, destination, date, fifth] = fields;
        match self {
            Self::OriginWeight => ShipmentRecord {
                shipment_id,
                origin: second,
                destination,
                date,
                weight: fifth,
                ..Default::default()
            },
            Self::RegionLoadType => ShipmentRecord {
                shipment_id,
                region: second,
                destination,
                date,
                load_type: fifth,
                ..Default::default()
            },
        }
    }
}

/// Splits lines on a single-byte delimiter without any quoting rules.
#[derive(Debug, Clone)]
pub struct DelimitedParser {
    delimiter: u8,
    layout: FieldLayout,
}

impl DelimitedParser {
    pub fn new(delimiter: u8, layout: FieldLayout) -> Self {
        Self { delimiter, layout }
    }
}

impl RecordParser for DelimitedParser {
    fn parse(&self, content: &[u8]) -> Vec<ShipmentRecord> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::All)
            .from_reader(content);

        let mut records = Vec::new();
        for (index, row) in reader.byte_records().enumerate() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    tracing::debug!("Skipping unreadable line {}: {}", index + 1, e);
                    continue;
                }
            };

            if row.len() != FIELD_COUNT {
                tracing::debug!(
                    "Skipping line {} with {} field(s), expected {}",
                    index + 1,
                    row.len(),
                    FIELD_COUNT
                );
                continue;
            }

            let fields: [String; FIELD_COUNT] = std::array::from_fn(|i| {
                String::from_utf8_lossy(row.get(i).unwrap_or_default()).into_owned()
            });
            records.push(self.layout.build(fields));
        }

        records
    }
}
