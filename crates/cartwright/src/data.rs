//! Fixture loading.
//!
//! A fixture file is a JSON array of flat objects whose values are all strings.
//! Each object becomes one [`TestRecord`] and drives one independent scenario run,
//! in file order.

use crate::result::{CartwrightError, CartwrightResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Keys every purchase record must carry
pub const REQUIRED_FIELDS: [&str; 8] = [
    "firstName",
    "lastName",
    "email",
    "phone",
    "occupation",
    "gender",
    "password",
    "Product",
];

/// One fixture record: field name to string value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestRecord(BTreeMap<String, String>);

impl TestRecord {
    /// Build a record from key/value pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Value of a field
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over fields in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Read a fixture file into records, in file order.
///
/// The file is re-read on every call.
pub fn load_records(path: impl AsRef<Path>) -> CartwrightResult<Vec<TestRecord>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    parse_records(&content).map_err(|message| CartwrightError::Format {
        path: path.display().to_string(),
        message,
    })
}

fn parse_records(content: &str) -> Result<Vec<TestRecord>, String> {
    serde_json::from_str::<Vec<TestRecord>>(content).map_err(|e| e.to_string())
}

/// A purchase record with every required field present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Account email, also the login
    pub email: String,
    /// Mobile number
    pub phone: String,
    /// Occupation as shown in the registration drop-down
    pub occupation: String,
    /// "Male" or "Female" (any case); anything else leaves gender unset
    pub gender: String,
    /// Account password
    pub password: String,
    /// Catalog product to buy
    pub product: String,
}

impl PurchaseRecord {
    /// Validate a raw record. `index` is its position in the fixture.
    pub fn from_record(record: &TestRecord, index: usize) -> CartwrightResult<Self> {
        let values = REQUIRED_FIELDS.map(|name| record.get(name));
        if let Some(pos) = values.iter().position(Option::is_none) {
            return Err(CartwrightError::MissingField {
                index,
                field: REQUIRED_FIELDS[pos].to_string(),
            });
        }

        let [first_name, last_name, email, phone, occupation, gender, password, product] =
            values.map(|value| value.unwrap_or_default().to_string());
        Ok(Self {
            first_name,
            last_name,
            email,
            phone,
            occupation,
            gender,
            password,
            product,
        })
    }

    /// Short label for reports
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} / {}", self.email, self.product)
    }
}

/// Load a fixture and validate every record as a purchase record
pub fn load_purchase_records(path: impl AsRef<Path>) -> CartwrightResult<Vec<PurchaseRecord>> {
    load_records(path)?
        .iter()
        .enumerate()
        .map(|(i, r)| PurchaseRecord::from_record(r, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn full_record() -> TestRecord {
        TestRecord::from_pairs([
            ("firstName", "Asha"),
            ("lastName", "Rao"),
            ("email", "asha@example.com"),
            ("phone", "9876543210"),
            ("occupation", "Engineer"),
            ("gender", "Female"),
            ("password", "Secret#123"),
            ("Product", "ADIDAS ORIGINAL"),
        ])
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_preserves_order() {
            let records = parse_records(r#"[{"Product":"A"},{"Product":"B"},{"Product":"C"}]"#)
                .unwrap();
            let products: Vec<_> = records.iter().map(|r| r.get("Product").unwrap()).collect();
            assert_eq!(products, ["A", "B", "C"]);
        }

        #[test]
        fn test_empty_array_is_valid() {
            assert!(parse_records("[]").unwrap().is_empty());
        }

        #[test]
        fn test_object_root_rejected() {
            assert!(parse_records(r#"{"Product":"A"}"#).is_err());
        }

        #[test]
        fn test_nested_values_rejected() {
            assert!(parse_records(r#"[{"Product":{"name":"A"}}]"#).is_err());
        }

        #[test]
        fn test_non_string_values_rejected() {
            assert!(parse_records(r#"[{"phone":9876543210}]"#).is_err());
        }
    }

    mod load_tests {
        use super::*;

        #[test]
        fn test_missing_file_is_io_error() {
            let err = load_records("/definitely/not/here.json").unwrap_err();
            assert!(matches!(err, CartwrightError::Io(_)));
        }

        #[test]
        fn test_malformed_file_is_format_error() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(file, "not json").unwrap();
            let err = load_records(file.path()).unwrap_err();
            match err {
                CartwrightError::Format { path, .. } => {
                    assert_eq!(path, file.path().display().to_string());
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_rereads_on_every_call() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(file, r#"[{{"Product":"A"}}]"#).unwrap();
            assert_eq!(load_records(file.path()).unwrap().len(), 1);

            std::fs::write(file.path(), r#"[{"Product":"A"},{"Product":"B"}]"#).unwrap();
            assert_eq!(load_records(file.path()).unwrap().len(), 2);
        }
    }

    mod purchase_record_tests {
        use super::*;

        #[test]
        fn test_all_fields_mapped() {
            let rec = PurchaseRecord::from_record(&full_record(), 0).unwrap();
            assert_eq!(rec.first_name, "Asha");
            assert_eq!(rec.product, "ADIDAS ORIGINAL");
            assert_eq!(rec.label(), "asha@example.com / ADIDAS ORIGINAL");
        }

        #[test]
        fn test_missing_product_reported_with_index() {
            let record = TestRecord::from_pairs(
                full_record().iter().filter(|(k, _)| *k != "Product"),
            );
            let err = PurchaseRecord::from_record(&record, 3).unwrap_err();
            match err {
                CartwrightError::MissingField { index, field } => {
                    assert_eq!(index, 3);
                    assert_eq!(field, "Product");
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_each_required_field_is_enforced() {
            for (index, required) in REQUIRED_FIELDS.iter().enumerate() {
                let record = TestRecord::from_pairs(
                    full_record().iter().filter(|(k, _)| k != required),
                );
                match PurchaseRecord::from_record(&record, index) {
                    Err(CartwrightError::MissingField { index: at, field }) => {
                        assert_eq!(at, index);
                        assert_eq!(field, *required);
                    }
                    other => panic!("{required}: unexpected {other:?}"),
                }
            }
        }
    }
}
