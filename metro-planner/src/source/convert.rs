//! Conversion from line-definition DTOs to builder records.

use super::error::LoadError;
use super::types::{LineDto, LinkedStationDto, StationDto, StationEntryDto, TransferField};
use crate::network::{LineRecord, LinkedStationRecord, StationRecord, TransferRecord};

/// Convert one line definition into a [`LineRecord`].
///
/// Indexed lines keep their entries in file order; the builder sorts them by
/// position. Position keys must parse as integers.
pub fn line_record(name: &str, value: serde_json::Value) -> Result<LineRecord, LoadError> {
    let dto: LineDto = serde_json::from_value(value).map_err(|source| LoadError::LineShape {
        line: name.to_string(),
        source,
    })?;

    match dto {
        LineDto::Indexed(entries) => {
            let mut stations = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                let position = parse_position(name, &key)?;
                let entry: StationEntryDto =
                    serde_json::from_value(value).map_err(|source| LoadError::LineShape {
                        line: name.to_string(),
                        source,
                    })?;
                stations.push((position, station_record(entry)));
            }
            Ok(LineRecord::indexed(name, stations))
        }
        LineDto::Linked(stations) => Ok(LineRecord::linked(
            name,
            stations.into_iter().map(linked_record).collect(),
        )),
    }
}

fn parse_position(line: &str, key: &str) -> Result<i64, LoadError> {
    key.trim()
        .parse::<i64>()
        .map_err(|_| LoadError::InvalidPosition {
            line: line.to_string(),
            key: key.to_string(),
        })
}

fn station_record(entry: StationEntryDto) -> StationRecord {
    match entry {
        StationEntryDto::Name(name) => StationRecord::new(name),
        StationEntryDto::Detailed(StationDto {
            name,
            time,
            transfer,
        }) => StationRecord {
            name,
            time,
            transfers: transfer_records(transfer),
        },
    }
}

fn linked_record(dto: LinkedStationDto) -> LinkedStationRecord {
    LinkedStationRecord {
        station: StationRecord {
            name: dto.name,
            time: dto.time,
            transfers: transfer_records(dto.transfer),
        },
        next: dto.next,
        prev: dto.prev,
    }
}

fn transfer_records(field: Option<TransferField>) -> Vec<TransferRecord> {
    field
        .map(TransferField::into_vec)
        .unwrap_or_default()
        .into_iter()
        .map(|t| TransferRecord::new(t.line, t.station))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::LineLayout;
    use serde_json::json;

    #[test]
    fn indexed_line_with_mixed_entries() {
        let value = json!({
            "2": {"name": "Bank", "time": 3, "transfer": {"line": "Central", "station": "Bank"}},
            "1": "Moorgate",
        });

        let record = line_record("Northern", value).unwrap();
        assert_eq!(record.name, "Northern");

        let LineLayout::Indexed(stations) = record.layout else {
            panic!("expected indexed layout");
        };
        assert_eq!(stations.len(), 2);
        assert_eq!(
            stations[0],
            (
                2,
                StationRecord::new("Bank")
                    .with_time(3)
                    .with_transfer("Central", "Bank")
            )
        );
        assert_eq!(stations[1], (1, StationRecord::new("Moorgate")));
    }

    #[test]
    fn non_integer_position_rejected() {
        let err = line_record("Red", json!({"one": "A"})).unwrap_err();
        assert!(matches!(err, LoadError::InvalidPosition { key, .. } if key == "one"));
    }

    #[test]
    fn linked_line() {
        let value = json!([
            {"name": "A", "next": ["B"], "time": 2},
            {"name": "B", "prev": ["A"], "transfer": [{"line": "Blue", "station": "X"}]},
        ]);

        let record = line_record("Red", value).unwrap();
        let LineLayout::Linked(stations) = record.layout else {
            panic!("expected linked layout");
        };
        assert_eq!(
            stations,
            vec![
                LinkedStationRecord::new(StationRecord::new("A").with_time(2)).with_next("B"),
                LinkedStationRecord::new(StationRecord::new("B").with_transfer("Blue", "X"))
                    .with_prev("A"),
            ]
        );
    }

    #[test]
    fn wrong_shape_rejected() {
        let err = line_record("Red", json!(42)).unwrap_err();
        assert!(matches!(err, LoadError::LineShape { line, .. } if line == "Red"));

        let err = line_record("Red", json!({"1": 42})).unwrap_err();
        assert!(matches!(err, LoadError::LineShape { .. }));
    }
}
