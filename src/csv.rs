use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::station::{Pump, Statistics};
use crate::{FuelVariant, Request};

/// Errors that can occur when parsing csv rows
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized request type '{request_type}'")]
    UnrecognizedType { line: usize, request_type: String },

    #[error("line {line}: {request_type} missing amount")]
    MissingAmount { line: usize, request_type: String },

    #[error("line {line}: {request_type} missing price")]
    MissingPrice { line: usize, request_type: String },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    r#type: String,
    variant: FuelVariant,
    amount: Option<f64>,
    price: Option<f64>,
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    item: &'a str,
    variant: Option<FuelVariant>,
    value: String,
}

impl InputRow {
    fn amount(&self, line: usize) -> Result<f64, CsvError> {
        self.amount.ok_or_else(|| CsvError::MissingAmount {
            line,
            request_type: self.r#type.clone(),
        })
    }

    fn price(&self, line: usize) -> Result<f64, CsvError> {
        self.price.ok_or_else(|| CsvError::MissingPrice {
            line,
            request_type: self.r#type.clone(),
        })
    }

    fn into_request(self, line: usize) -> Result<Request, CsvError> {
        let variant = self.variant;
        match self.r#type.as_str() {
            "pump" => Ok(Request::AddPump {
                variant,
                amount: self.amount(line)?,
            }),
            "price" => Ok(Request::SetPrice {
                variant,
                price: self.price(line)?,
            }),
            "buy" => Ok(Request::Buy {
                variant,
                amount: self.amount(line)?,
                max_price: self.price(line)?,
            }),
            other => Err(CsvError::UnrecognizedType {
                line,
                request_type: other.to_string(),
            }),
        }
    }
}

/// Read station requests from a csv file
pub fn read_requests(path: impl AsRef<Path>) -> impl Iterator<Item = Result<Request, CsvError>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .expect("failed to open csv file");

    reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            row.into_request(line)
        })
}

/// write the pump levels and station statistics to stdout in csv format
pub fn write_report(pumps: &[Pump], stats: Statistics) {
    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    let pump_rows = pumps.iter().map(|pump| OutputRow {
        item: "pump",
        variant: Some(pump.variant()),
        value: pump.remaining_amount().to_string(),
    });
    let stat_rows = [
        ("revenue", stats.revenue.to_string()),
        ("sales", stats.sales.to_string()),
        ("cancellations_no_gas", stats.cancellations_no_gas.to_string()),
        (
            "cancellations_too_expensive",
            stats.cancellations_too_expensive.to_string(),
        ),
    ]
    .into_iter()
    .map(|(item, value)| OutputRow {
        item,
        variant: None,
        value,
    });

    for row in pump_rows.chain(stat_rows) {
        writer.serialize(&row).expect("failed to write csv row");
    }

    writer.flush().expect("failed to flush csv writer");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn read_one(content: &str) -> Result<Request, CsvError> {
        let file = write_csv(content);
        let mut results: Vec<_> = read_requests(file.path()).collect();
        assert_eq!(results.len(), 1);
        results.remove(0)
    }

    #[test]
    fn read_pump() {
        let request = read_one("type,variant,amount,price\npump,diesel,22.5,\n").unwrap();
        assert_eq!(
            request,
            Request::AddPump {
                variant: FuelVariant::Diesel,
                amount: 22.5
            }
        );
    }

    #[test]
    fn read_price() {
        let request = read_one("type,variant,amount,price\nprice,super,,5.7\n").unwrap();
        assert_eq!(
            request,
            Request::SetPrice {
                variant: FuelVariant::Super,
                price: 5.7
            }
        );
    }

    #[test]
    fn read_buy() {
        let request = read_one("type,variant,amount,price\nbuy,regular,10,2.0\n").unwrap();
        assert_eq!(
            request,
            Request::Buy {
                variant: FuelVariant::Regular,
                amount: 10.0,
                max_price: 2.0
            }
        );
    }

    #[test]
    fn read_variant_ignores_case() {
        let request = read_one("type,variant,amount,price\nbuy,DIESEL,1,1\n").unwrap();
        assert_eq!(
            request,
            Request::Buy {
                variant: FuelVariant::Diesel,
                amount: 1.0,
                max_price: 1.0
            }
        );
    }

    #[test]
    fn read_with_whitespace() {
        let result = read_one("type, variant, amount, price\nbuy, diesel, 1.5, 2\n");
        assert!(result.is_ok());
    }

    #[test]
    fn read_returns_error_for_unknown_type() {
        let err = read_one("type,variant,amount,price\nrefund,diesel,1,1\n").unwrap_err();
        assert!(matches!(err, CsvError::UnrecognizedType { line: 2, .. }));
    }

    #[test]
    fn read_returns_error_for_unknown_variant() {
        let err = read_one("type,variant,amount,price\nbuy,kerosene,1,1\n").unwrap_err();
        assert!(matches!(err, CsvError::Parse { line: 2, .. }));
        assert!(err.to_string().contains("unknown fuel variant 'kerosene'"));
    }

    #[test]
    fn read_returns_error_for_missing_amount() {
        let err = read_one("type,variant,amount,price\nbuy,diesel,,2\n").unwrap_err();
        assert!(matches!(err, CsvError::MissingAmount { line: 2, .. }));
    }

    #[test]
    fn read_returns_error_for_missing_price() {
        let err = read_one("type,variant,amount,price\nprice,diesel,,\n").unwrap_err();
        assert!(matches!(err, CsvError::MissingPrice { line: 2, .. }));
    }

    #[test]
    fn read_keeps_going_after_bad_rows() {
        let file = write_csv(
            "type,variant,amount,price\nbuy,diesel,,2\npump,diesel,10,\nnope,diesel,1,1\n",
        );
        let results: Vec<_> = read_requests(file.path()).collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_err());
        assert!(results[1].is_ok());
        assert!(matches!(
            results[2],
            Err(CsvError::UnrecognizedType { line: 4, .. })
        ));
    }
}
