//! Column mappings loaded from YAML.
//!
//! A mapping names the columns to read, the type to read each as, and an
//! optional default. Projecting a row through it yields one JSON object:
//!
//! ```yaml
//! columns:
//!   - column: Id
//!     type: i32
//!   - column: CreatedAt
//!     type: date_time
//!     kind: utc
//!     output: created_at
//!   - column: Nickname
//!     type: string
//!     default: anonymous
//! ```
//!
//! Defaults are validated when the mapping is loaded, so a bad default is a
//! configuration error rather than a silent fallback. Columns without one use
//! the built-in default of their type.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use base64::Engine;
use chrono::TimeDelta;
use row_access::{BuiltinDefault, RecordExt};
use row_convert::{strict, ConversionError, DateTimeKind, KindedDateTime};
use row_core::{format_interval, DataRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Error type for mapping operations.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// Error reading mapping file
    #[error("Failed to read mapping file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Mapping declares no columns")]
    NoColumns,

    #[error("Output name '{0}' is used by more than one column")]
    DuplicateOutput(String),

    #[error("Column '{column}' sets a kind, but {target} values have none")]
    KindNotApplicable {
        column: String,
        target: TargetType,
    },

    #[error("Invalid default for column '{column}' ({target}): {source}")]
    InvalidDefault {
        column: String,
        target: TargetType,
        #[source]
        source: ConversionError,
    },

    #[error("Default for column '{column}' ({target}) must be a scalar")]
    NonScalarDefault {
        column: String,
        target: TargetType,
    },
}

/// Type a mapped column is read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    Decimal,
    I16,
    I32,
    I64,
    F32,
    F64,
    NullableI32,
    String,
    Bool,
    NullableBool,
    DateTime,
    NullableDateTime,
    SqlDateTime,
    TimeSpan,
    Uuid,
    Bytes,
    Document,
}

impl TargetType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::NullableI32 => "nullable_i32",
            Self::String => "string",
            Self::Bool => "bool",
            Self::NullableBool => "nullable_bool",
            Self::DateTime => "date_time",
            Self::NullableDateTime => "nullable_date_time",
            Self::SqlDateTime => "sql_date_time",
            Self::TimeSpan => "time_span",
            Self::Uuid => "uuid",
            Self::Bytes => "bytes",
            Self::Document => "document",
        }
    }

    fn takes_kind(self) -> bool {
        matches!(self, Self::DateTime | Self::NullableDateTime)
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column entry as written in the YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column name in the row (matched ignoring case)
    pub column: String,

    #[serde(rename = "type")]
    pub target: TargetType,

    /// Value used when the column is missing, null or unconvertible
    #[serde(default)]
    pub default: Option<serde_yaml::Value>,

    /// Kind stamped on parsed date-times
    #[serde(default)]
    pub kind: Option<DateTimeKind>,

    /// Key in the projected object; the column name when omitted
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct MappingFile {
    columns: Vec<ColumnDefinition>,
}

/// Default of a mapped column, already converted to its target type.
#[derive(Debug, Clone, PartialEq)]
enum TypedDefault {
    Decimal(Decimal),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    NullableI32(Option<i32>),
    String(String),
    Bool(bool),
    NullableBool(Option<bool>),
    DateTime(KindedDateTime),
    NullableDateTime(Option<KindedDateTime>),
    SqlDateTime(KindedDateTime),
    TimeSpan(TimeDelta),
    Uuid(Uuid),
    Bytes(Vec<u8>),
    Document(Value),
}

fn builtin_default(target: TargetType) -> TypedDefault {
    match target {
        TargetType::Decimal => TypedDefault::Decimal(Decimal::builtin_default()),
        TargetType::I16 => TypedDefault::I16(i16::builtin_default()),
        TargetType::I32 => TypedDefault::I32(i32::builtin_default()),
        TargetType::I64 => TypedDefault::I64(i64::builtin_default()),
        TargetType::F32 => TypedDefault::F32(f32::builtin_default()),
        TargetType::F64 => TypedDefault::F64(f64::builtin_default()),
        TargetType::NullableI32 => TypedDefault::NullableI32(None),
        TargetType::String => TypedDefault::String(String::builtin_default()),
        TargetType::Bool => TypedDefault::Bool(bool::builtin_default()),
        TargetType::NullableBool => TypedDefault::NullableBool(None),
        TargetType::DateTime => TypedDefault::DateTime(KindedDateTime::default()),
        TargetType::NullableDateTime => TypedDefault::NullableDateTime(None),
        TargetType::SqlDateTime => TypedDefault::SqlDateTime(KindedDateTime::unspecified(
            row_convert::datetime::sql_date_time_min(),
        )),
        TargetType::TimeSpan => TypedDefault::TimeSpan(TimeDelta::zero()),
        TargetType::Uuid => TypedDefault::Uuid(Uuid::nil()),
        TargetType::Bytes => TypedDefault::Bytes(Vec::new()),
        TargetType::Document => TypedDefault::Document(Value::builtin_default()),
    }
}

fn parse_default(target: TargetType, text: &str) -> Result<TypedDefault, ConversionError> {
    Ok(match target {
        TargetType::Decimal => TypedDefault::Decimal(strict::parse_decimal(text)?),
        TargetType::I16 => TypedDefault::I16(strict::parse_number(text, "i16")?),
        TargetType::I32 => TypedDefault::I32(strict::parse_number(text, "i32")?),
        TargetType::I64 => TypedDefault::I64(strict::parse_number(text, "i64")?),
        TargetType::F32 => TypedDefault::F32(strict::parse_number(text, "f32")?),
        TargetType::F64 => TypedDefault::F64(strict::parse_number(text, "f64")?),
        TargetType::NullableI32 => TypedDefault::NullableI32(Some(strict::parse_number(text, "i32")?)),
        TargetType::String => TypedDefault::String(text.to_string()),
        TargetType::Bool => TypedDefault::Bool(strict::parse_bool(text)?),
        TargetType::NullableBool => TypedDefault::NullableBool(Some(strict::parse_bool(text)?)),
        TargetType::DateTime => TypedDefault::DateTime(strict::parse_date_time(text)?),
        TargetType::NullableDateTime => {
            TypedDefault::NullableDateTime(Some(strict::parse_date_time(text)?))
        }
        TargetType::SqlDateTime => TypedDefault::SqlDateTime(strict::parse_date_time(text)?),
        TargetType::TimeSpan => TypedDefault::TimeSpan(strict::parse_time_span(text)?),
        TargetType::Uuid => TypedDefault::Uuid(strict::parse_uuid(text)?),
        TargetType::Bytes => TypedDefault::Bytes(
            base64::engine::general_purpose::STANDARD
                .decode(text.trim())
                .map_err(|_| ConversionError::NotBinary)?,
        ),
        TargetType::Document => TypedDefault::Document(strict::parse_document(text)?),
    })
}

fn resolve_default(definition: &ColumnDefinition) -> Result<TypedDefault, MappingError> {
    let text = match &definition.default {
        None | Some(serde_yaml::Value::Null) => return Ok(builtin_default(definition.target)),
        Some(serde_yaml::Value::String(s)) => s.clone(),
        Some(serde_yaml::Value::Number(n)) => n.to_string(),
        Some(serde_yaml::Value::Bool(b)) => b.to_string(),
        // Documents may be written inline as YAML.
        Some(other) if definition.target == TargetType::Document => {
            let document = serde_json::to_value(other).map_err(|err| {
                MappingError::InvalidDefault {
                    column: definition.column.clone(),
                    target: definition.target,
                    source: err.into(),
                }
            })?;
            return Ok(TypedDefault::Document(document));
        }
        Some(_) => {
            return Err(MappingError::NonScalarDefault {
                column: definition.column.clone(),
                target: definition.target,
            })
        }
    };
    parse_default(definition.target, &text).map_err(|source| MappingError::InvalidDefault {
        column: definition.column.clone(),
        target: definition.target,
        source,
    })
}

/// A validated column entry.
#[derive(Debug, Clone)]
pub struct MappedColumn {
    column: String,
    output: String,
    kind: Option<DateTimeKind>,
    default: TypedDefault,
}

impl MappedColumn {
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    fn read<R: DataRecord + ?Sized>(&self, record: &R) -> Value {
        let name = self.column.as_str();
        match &self.default {
            TypedDefault::Decimal(d) => Value::String(record.read_as(name, *d).to_string()),
            TypedDefault::I16(d) => Value::from(record.read_as(name, *d)),
            TypedDefault::I32(d) => Value::from(record.read_as(name, *d)),
            TypedDefault::I64(d) => Value::from(record.read_as(name, *d)),
            TypedDefault::F32(d) => float_value(f64::from(record.read_as(name, *d))),
            TypedDefault::F64(d) => float_value(record.read_as(name, *d)),
            TypedDefault::NullableI32(d) => Value::from(record.read_as(name, *d)),
            TypedDefault::String(d) => Value::String(record.read_as(name, d.clone())),
            TypedDefault::Bool(d) => Value::Bool(record.read_as(name, *d)),
            TypedDefault::NullableBool(d) => Value::from(record.read_as(name, *d)),
            TypedDefault::DateTime(d) => {
                let read = match self.kind {
                    Some(kind) => record.read_date_time_with_kind(name, kind, *d),
                    None => record.read_as(name, *d),
                };
                date_time_value(&read)
            }
            TypedDefault::NullableDateTime(d) => {
                let read = match self.kind {
                    Some(kind) => record.read_date_time_nullable_with_kind(name, kind, *d),
                    None => record.read_as(name, *d),
                };
                read.as_ref().map_or(Value::Null, date_time_value)
            }
            TypedDefault::SqlDateTime(d) => date_time_value(&record.read_sql_date_time(name, *d)),
            TypedDefault::TimeSpan(d) => Value::String(format_interval(&record.read_as(name, *d))),
            TypedDefault::Uuid(d) => Value::String(record.read_as(name, *d).to_string()),
            TypedDefault::Bytes(d) => Value::String(
                base64::engine::general_purpose::STANDARD.encode(record.read_as(name, d.clone())),
            ),
            TypedDefault::Document(d) => record.read_document(name, d.clone()),
        }
    }
}

fn float_value(value: f64) -> Value {
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// Render a date-time as ISO 8601, with a `Z` suffix for UTC values.
fn date_time_value(value: &KindedDateTime) -> Value {
    let text = value.value.format("%Y-%m-%dT%H:%M:%S%.f").to_string();
    match value.kind {
        DateTimeKind::Utc => Value::String(format!("{text}Z")),
        DateTimeKind::Unspecified | DateTimeKind::Local => Value::String(text),
    }
}

/// Validated column mapping.
#[derive(Debug, Clone)]
pub struct RowMapping {
    columns: Vec<MappedColumn>,
}

impl RowMapping {
    /// Load a mapping from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MappingError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a mapping from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, MappingError> {
        let file: MappingFile = serde_yaml::from_str(yaml)?;
        Self::from_definitions(file.columns)
    }

    pub fn from_definitions(definitions: Vec<ColumnDefinition>) -> Result<Self, MappingError> {
        if definitions.is_empty() {
            return Err(MappingError::NoColumns);
        }

        let mut outputs = HashSet::new();
        let mut columns = Vec::with_capacity(definitions.len());
        for definition in definitions {
            if definition.kind.is_some() && !definition.target.takes_kind() {
                return Err(MappingError::KindNotApplicable {
                    column: definition.column,
                    target: definition.target,
                });
            }
            let default = resolve_default(&definition)?;
            let output = definition
                .output
                .unwrap_or_else(|| definition.column.clone());
            if !outputs.insert(output.clone()) {
                return Err(MappingError::DuplicateOutput(output));
            }
            columns.push(MappedColumn {
                column: definition.column,
                output,
                kind: definition.kind,
                default,
            });
        }

        tracing::debug!("Loaded mapping with {} columns", columns.len());
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[MappedColumn] {
        &self.columns
    }

    /// Read every mapped column of `record` into a JSON object.
    ///
    /// Never fails: unreadable columns take their default.
    pub fn project<R: DataRecord + ?Sized>(&self, record: &R) -> Map<String, Value> {
        self.columns
            .iter()
            .map(|column| (column.output.clone(), column.read(record)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use row_core::MemoryRow;
    use serde_json::json;

    const SAMPLE_MAPPING: &str = r#"
columns:
  - column: Id
    type: i32
  - column: Price
    type: decimal
    default: "0.00"
  - column: Active
    type: bool
    default: true
  - column: CreatedAt
    type: date_time
    kind: utc
    output: created_at
  - column: Nickname
    type: string
    default: anonymous
  - column: Meta
    type: document
    default:
      source: mapping
"#;

    fn sample_row() -> MemoryRow {
        MemoryRow::builder()
            .column("id", "42")
            .column("PRICE", "not money")
            .column("Active", "Disabled")
            .column("CreatedAt", "2024-03-01 08:15:00")
            .null("Nickname")
            .build()
    }

    #[test]
    fn test_parse_mapping() {
        let mapping = RowMapping::from_yaml(SAMPLE_MAPPING).unwrap();
        assert_eq!(mapping.columns().len(), 6);
        assert_eq!(mapping.columns()[3].column(), "CreatedAt");
        assert_eq!(mapping.columns()[3].output(), "created_at");
        assert_eq!(mapping.columns()[0].output(), "Id");
    }

    #[test]
    fn test_project_row() {
        let mapping = RowMapping::from_yaml(SAMPLE_MAPPING).unwrap();
        let projected = Value::Object(mapping.project(&sample_row()));
        assert_eq!(
            projected,
            json!({
                "Id": 42,
                "Price": "0.00",
                "Active": false,
                "created_at": "2024-03-01T08:15:00Z",
                "Nickname": "anonymous",
                "Meta": {"source": "mapping"},
            })
        );
    }

    #[test]
    fn test_project_absent_row_uses_defaults() {
        let mapping = RowMapping::from_yaml(SAMPLE_MAPPING).unwrap();
        let projected = mapping.project(&None::<MemoryRow>);
        assert_eq!(projected["Id"], json!(-1));
        assert_eq!(projected["Active"], json!(true));
        assert_eq!(projected["created_at"], json!("1970-01-01T00:00:00"));
    }

    #[test]
    fn test_invalid_default() {
        let yaml = "columns:\n  - column: Id\n    type: i32\n    default: seven\n";
        let err = RowMapping::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, MappingError::InvalidDefault { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid default for column 'Id' (i32): Failed to parse 'seven' as i32"
        );
    }

    #[test]
    fn test_non_scalar_default() {
        let yaml = "columns:\n  - column: Tags\n    type: string\n    default: [a, b]\n";
        assert!(matches!(
            RowMapping::from_yaml(yaml),
            Err(MappingError::NonScalarDefault { .. })
        ));
    }

    #[test]
    fn test_kind_only_on_date_times() {
        let yaml = "columns:\n  - column: Id\n    type: i32\n    kind: utc\n";
        let err = RowMapping::from_yaml(yaml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Column 'Id' sets a kind, but i32 values have none"
        );
    }

    #[test]
    fn test_duplicate_output() {
        let yaml = "columns:\n  - column: Id\n    type: i32\n  - column: ID\n    type: i64\n    output: Id\n";
        assert!(matches!(
            RowMapping::from_yaml(yaml),
            Err(MappingError::DuplicateOutput(name)) if name == "Id"
        ));
    }

    #[test]
    fn test_empty_mapping() {
        assert!(matches!(
            RowMapping::from_yaml("columns: []\n"),
            Err(MappingError::NoColumns)
        ));
    }

    #[test]
    fn test_unknown_type() {
        let yaml = "columns:\n  - column: Id\n    type: int128\n";
        assert!(matches!(
            RowMapping::from_yaml(yaml),
            Err(MappingError::YamlError(_))
        ));
    }

    #[test]
    fn test_value_rendering() {
        let row = MemoryRow::builder()
            .column("Elapsed", "1.02:03:04")
            .column("Blob", vec![0u8, 255])
            .column("Ratio", "NaN")
            .column("Key", "{550e8400-e29b-41d4-a716-446655440000}")
            .build();
        let mapping = RowMapping::from_yaml(
            r#"
columns:
  - column: Elapsed
    type: time_span
  - column: Blob
    type: bytes
  - column: Ratio
    type: f64
  - column: Key
    type: uuid
  - column: Missing
    type: nullable_date_time
"#,
        )
        .unwrap();
        let projected = mapping.project(&row);
        assert_eq!(projected["Elapsed"], json!("1.02:03:04"));
        assert_eq!(projected["Blob"], json!("AP8="));
        assert_eq!(projected["Ratio"], Value::Null);
        assert_eq!(projected["Key"], json!("550e8400-e29b-41d4-a716-446655440000"));
        assert_eq!(projected["Missing"], Value::Null);
    }
}
