// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Source and destination records.
//!
//! Both are tagged by their `type` field, and each type carries only the
//! fields that make sense for it: file paths for files, connection and table
//! for databases, and so on. Switching type therefore means building a fresh
//! record rather than editing the old one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of system a task reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Csv,
    Txt,
    Mssql,
    Postgres,
    Api,
    Kafka,
}

impl SourceType {
    pub fn all() -> &'static [SourceType] {
        &[
            SourceType::Csv,
            SourceType::Txt,
            SourceType::Mssql,
            SourceType::Postgres,
            SourceType::Api,
            SourceType::Kafka,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceType::Csv => "CSV / Excel",
            SourceType::Txt => "Text (TXT)",
            SourceType::Mssql => "SQL Server",
            SourceType::Postgres => "PostgreSQL",
            SourceType::Api => "HTTP API",
            SourceType::Kafka => "Kafka",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceType::Csv => "csv",
            SourceType::Txt => "txt",
            SourceType::Mssql => "mssql",
            SourceType::Postgres => "postgres",
            SourceType::Api => "api",
            SourceType::Kafka => "kafka",
        };
        f.write_str(name)
    }
}

/// Kind of system a task writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationType {
    Mssql,
    Postgres,
    S3,
    File,
    Txt,
}

impl DestinationType {
    pub fn all() -> &'static [DestinationType] {
        &[
            DestinationType::Mssql,
            DestinationType::Postgres,
            DestinationType::S3,
            DestinationType::File,
            DestinationType::Txt,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            DestinationType::Mssql => "SQL Server",
            DestinationType::Postgres => "PostgreSQL",
            DestinationType::S3 => "S3 / Object Store",
            DestinationType::File => "File (CSV/Parquet)",
            DestinationType::Txt => "Text (TXT)",
        }
    }
}

impl fmt::Display for DestinationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DestinationType::Mssql => "mssql",
            DestinationType::Postgres => "postgres",
            DestinationType::S3 => "s3",
            DestinationType::File => "file",
            DestinationType::Txt => "txt",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileSource {
    pub name: String,
    pub path: String,
    pub delimiter: String,
    pub has_header: bool,
}

impl Default for FileSource {
    fn default() -> Self {
        Self {
            name: String::new(),
            path: String::new(),
            delimiter: ",".to_string(),
            has_header: true,
        }
    }
}

/// Database source. `sql` is only used by SQL-transform tasks, which read
/// the result of a statement instead of a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatabaseSource {
    pub name: String,
    pub connection: String,
    pub schema: String,
    pub table: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sql: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiSource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreamSource {
    pub name: String,
    pub brokers: String,
    pub topic: String,
}

/// Where a task reads from, tagged by `type`.
///
/// # Example
/// ```json
/// { "type": "csv", "name": "orders", "path": "/in/orders.csv", "delimiter": ",", "hasHeader": true }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Source {
    Csv(FileSource),
    Txt(FileSource),
    Mssql(DatabaseSource),
    Postgres(DatabaseSource),
    Api(ApiSource),
    Kafka(StreamSource),
}

impl Source {
    /// A fresh record of the given type with every field at its default.
    pub fn default_for(source_type: SourceType) -> Self {
        match source_type {
            SourceType::Csv => Source::Csv(FileSource::default()),
            SourceType::Txt => Source::Txt(FileSource {
                delimiter: "|".to_string(),
                ..FileSource::default()
            }),
            SourceType::Mssql => Source::Mssql(DatabaseSource::default()),
            SourceType::Postgres => Source::Postgres(DatabaseSource::default()),
            SourceType::Api => Source::Api(ApiSource::default()),
            SourceType::Kafka => Source::Kafka(StreamSource::default()),
        }
    }

    pub fn source_type(&self) -> SourceType {
        match self {
            Source::Csv(_) => SourceType::Csv,
            Source::Txt(_) => SourceType::Txt,
            Source::Mssql(_) => SourceType::Mssql,
            Source::Postgres(_) => SourceType::Postgres,
            Source::Api(_) => SourceType::Api,
            Source::Kafka(_) => SourceType::Kafka,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Source::Csv(f) | Source::Txt(f) => &f.name,
            Source::Mssql(d) | Source::Postgres(d) => &d.name,
            Source::Api(a) => &a.name,
            Source::Kafka(s) => &s.name,
        }
    }

    /// Set one field by its wire name. Returns `false` when the current
    /// source type has no such field; the record is left untouched then.
    pub fn set_field(&mut self, key: &str, value: &str) -> bool {
        let slot = match (self, key) {
            (Source::Csv(f) | Source::Txt(f), "hasHeader") => {
                f.has_header = parse_flag(value);
                return true;
            }
            (Source::Csv(f) | Source::Txt(f), "name") => &mut f.name,
            (Source::Csv(f) | Source::Txt(f), "path") => &mut f.path,
            (Source::Csv(f) | Source::Txt(f), "delimiter") => &mut f.delimiter,
            (Source::Mssql(d) | Source::Postgres(d), "name") => &mut d.name,
            (Source::Mssql(d) | Source::Postgres(d), "connection") => &mut d.connection,
            (Source::Mssql(d) | Source::Postgres(d), "schema") => &mut d.schema,
            (Source::Mssql(d) | Source::Postgres(d), "table") => &mut d.table,
            (Source::Mssql(d) | Source::Postgres(d), "sql") => &mut d.sql,
            (Source::Api(a), "name") => &mut a.name,
            (Source::Api(a), "url") => &mut a.url,
            (Source::Kafka(s), "name") => &mut s.name,
            (Source::Kafka(s), "brokers") => &mut s.brokers,
            (Source::Kafka(s), "topic") => &mut s.topic,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatabaseDestination {
    pub db: String,
    pub schema: String,
    pub table: String,
    pub upsert_key: String,
}

impl Default for DatabaseDestination {
    fn default() -> Self {
        Self {
            db: String::new(),
            schema: "dbo".to_string(),
            table: String::new(),
            upsert_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileDestination {
    pub path: String,
    pub delimiter: String,
    pub include_header: bool,
}

impl Default for FileDestination {
    fn default() -> Self {
        Self {
            path: String::new(),
            delimiter: ",".to_string(),
            include_header: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectDestination {
    pub bucket: String,
    pub path: String,
}

/// Where a task writes to, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Destination {
    Mssql(DatabaseDestination),
    Postgres(DatabaseDestination),
    S3(ObjectDestination),
    File(FileDestination),
    Txt(FileDestination),
}

impl Destination {
    pub fn default_for(destination_type: DestinationType) -> Self {
        match destination_type {
            DestinationType::Mssql => Destination::Mssql(DatabaseDestination::default()),
            DestinationType::Postgres => Destination::Postgres(DatabaseDestination::default()),
            DestinationType::S3 => Destination::S3(ObjectDestination::default()),
            DestinationType::File => Destination::File(FileDestination::default()),
            DestinationType::Txt => Destination::Txt(FileDestination {
                delimiter: "|".to_string(),
                ..FileDestination::default()
            }),
        }
    }

    pub fn destination_type(&self) -> DestinationType {
        match self {
            Destination::Mssql(_) => DestinationType::Mssql,
            Destination::Postgres(_) => DestinationType::Postgres,
            Destination::S3(_) => DestinationType::S3,
            Destination::File(_) => DestinationType::File,
            Destination::Txt(_) => DestinationType::Txt,
        }
    }

    /// The upsert key, present only for database destinations.
    pub fn upsert_key(&self) -> Option<&str> {
        match self {
            Destination::Mssql(d) | Destination::Postgres(d) => Some(&d.upsert_key),
            _ => None,
        }
    }

    pub fn set_field(&mut self, key: &str, value: &str) -> bool {
        let slot = match (self, key) {
            (Destination::File(f) | Destination::Txt(f), "includeHeader") => {
                f.include_header = parse_flag(value);
                return true;
            }
            (Destination::Mssql(d) | Destination::Postgres(d), "db") => &mut d.db,
            (Destination::Mssql(d) | Destination::Postgres(d), "schema") => &mut d.schema,
            (Destination::Mssql(d) | Destination::Postgres(d), "table") => &mut d.table,
            (Destination::Mssql(d) | Destination::Postgres(d), "upsertKey") => &mut d.upsert_key,
            (Destination::S3(o), "bucket") => &mut o.bucket,
            (Destination::S3(o), "path") => &mut o.path,
            (Destination::File(f) | Destination::Txt(f), "path") => &mut f.path,
            (Destination::File(f) | Destination::Txt(f), "delimiter") => &mut f.delimiter,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_type_labels_are_distinct_per_side() {
        let sources: HashSet<&str> = SourceType::all().iter().map(|t| t.label()).collect();
        assert_eq!(sources.len(), SourceType::all().len());

        let destinations: HashSet<&str> =
            DestinationType::all().iter().map(|t| t.label()).collect();
        assert_eq!(destinations.len(), DestinationType::all().len());
        assert_eq!(DestinationType::S3.label(), "S3 / Object Store");
    }

    #[test]
    fn test_source_wire_shape() {
        let source = Source::default_for(SourceType::Csv);
        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json["type"], "csv");
        assert_eq!(json["delimiter"], ",");
        assert_eq!(json["hasHeader"], true);

        let parsed: Source = serde_json::from_str(r#"{"type":"postgres","table":"orders"}"#).unwrap();
        match parsed {
            Source::Postgres(db) => {
                assert_eq!(db.table, "orders");
                assert!(db.connection.is_empty());
            }
            other => panic!("expected postgres source, got {:?}", other),
        }
    }

    #[test]
    fn test_default_records_match_their_type() {
        for source_type in SourceType::all() {
            assert_eq!(Source::default_for(*source_type).source_type(), *source_type);
        }
        for destination_type in DestinationType::all() {
            assert_eq!(
                Destination::default_for(*destination_type).destination_type(),
                *destination_type
            );
        }
        match Source::default_for(SourceType::Txt) {
            Source::Txt(f) => assert_eq!(f.delimiter, "|"),
            other => panic!("expected txt source, got {:?}", other),
        }
    }

    #[test]
    fn test_upsert_key_only_on_database_destinations() {
        assert_eq!(Destination::default_for(DestinationType::Mssql).upsert_key(), Some(""));
        assert_eq!(Destination::default_for(DestinationType::File).upsert_key(), None);
        assert_eq!(Destination::default_for(DestinationType::S3).upsert_key(), None);

        let json = serde_json::to_value(Destination::default_for(DestinationType::File)).unwrap();
        assert!(json.get("upsertKey").is_none());
    }

    #[test]
    fn test_set_field_respects_record_shape() {
        let mut source = Source::default_for(SourceType::Csv);
        assert!(source.set_field("path", "/data/in.csv"));
        assert!(source.set_field("hasHeader", "false"));
        assert!(!source.set_field("table", "orders"));

        match &source {
            Source::Csv(f) => {
                assert_eq!(f.path, "/data/in.csv");
                assert!(!f.has_header);
            }
            other => panic!("expected csv source, got {:?}", other),
        }

        let mut destination = Destination::default_for(DestinationType::Postgres);
        assert!(destination.set_field("upsertKey", "order_id"));
        assert!(!destination.set_field("bucket", "x"));
        assert_eq!(destination.upsert_key(), Some("order_id"));
    }
}
