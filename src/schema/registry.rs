// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{ConfigError, SchemaError};
use crate::model::Category;
use crate::observability::messages::schema::{SchemaLoaded, SchemaMissing};
use crate::observability::messages::StructuredLog;
use crate::schema::validation::validate_schemas;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const BUILTIN_SCHEMAS: &str = include_str!("../../configs/module-schemas.yaml");

static EMPTY_SCHEMA: ModuleSchema = ModuleSchema {
    source: Vec::new(),
    destination: Vec::new(),
};

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Textarea,
    Select,
    Password,
}

/// One configurable field of a source or destination.
///
/// # Example
/// ```yaml
/// { key: mode, label: Write Mode, input: select, options: [append, merge] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub key: String,
    pub label: String,
    pub input: InputKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl FieldDescriptor {
    pub fn new(key: &str, label: &str, input: InputKind) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            input,
            options: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|o| o.to_string()).collect();
        self
    }
}

/// The source and destination fields of one category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleSchema {
    #[serde(default)]
    pub source: Vec<FieldDescriptor>,
    #[serde(default)]
    pub destination: Vec<FieldDescriptor>,
}

impl ModuleSchema {
    pub fn is_empty(&self) -> bool {
        self.source.is_empty() && self.destination.is_empty()
    }
}

/// Declarative table of form fields, keyed by category wire name.
///
/// The table ships with the crate and can be replaced at startup by an
/// operator-supplied YAML file of the same shape. Lookups are total: a
/// category with no entry has no fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, ModuleSchema>,
}

impl SchemaRegistry {
    /// The table embedded in the crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        let registry = Self::from_yaml_str(BUILTIN_SCHEMAS)?;
        SchemaLoaded {
            origin: "builtin",
            category_count: registry.len(),
        }
        .log();
        Ok(registry)
    }

    /// Load an override table from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_yaml_str(&content)?;
        SchemaLoaded {
            origin: &path.display().to_string(),
            category_count: registry.len(),
        }
        .log();
        Ok(registry)
    }

    /// Load `path` when given, otherwise the builtin table.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Parse and validate a YAML table. Legacy category spellings are
    /// normalized; unrecognized names are kept verbatim so they can still
    /// be looked up by name. Two spellings of one category are an error.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, ModuleSchema> = serde_yaml::from_str(yaml)?;

        let mut schemas: BTreeMap<String, ModuleSchema> = BTreeMap::new();
        let mut errors = Vec::new();
        for (name, schema) in raw {
            let category = canonical_name(&name);
            if schemas.contains_key(&category) {
                errors.push(SchemaError::DuplicateCategory { category, name });
                continue;
            }
            schemas.insert(category, schema);
        }

        if let Err(mut found) = validate_schemas(&schemas) {
            errors.append(&mut found);
        }
        if !errors.is_empty() {
            return Err(ConfigError::InvalidSchema(errors));
        }
        Ok(Self { schemas })
    }

    /// Fields for `category`; empty when the table has no entry.
    pub fn fields_for(&self, category: Category) -> &ModuleSchema {
        self.fields_for_name(category.wire_name())
    }

    /// Fields for a category given by name, for callers holding an
    /// unparsed node type.
    pub fn fields_for_name(&self, name: &str) -> &ModuleSchema {
        match self.schemas.get(&canonical_name(name)) {
            Some(schema) => schema,
            None => {
                SchemaMissing { category: name }.log();
                &EMPTY_SCHEMA
            }
        }
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

fn canonical_name(name: &str) -> String {
    name.parse::<Category>()
        .map(|c| c.wire_name().to_string())
        .unwrap_or_else(|_| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_category() {
        let registry = SchemaRegistry::builtin().unwrap();
        for category in Category::all() {
            assert!(
                !registry.fields_for(*category).is_empty(),
                "no fields for {}",
                category
            );
        }
    }

    #[test]
    fn test_builtin_sql_transform_fields() {
        let registry = SchemaRegistry::builtin().unwrap();
        let schema = registry.fields_for(Category::SqlTransform);

        let keys: Vec<&str> = schema.source.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["conn", "schema", "sql"]);
        assert_eq!(schema.source[2].input, InputKind::Textarea);

        let mode = &schema.destination[2];
        assert_eq!(mode.input, InputKind::Select);
        assert_eq!(mode.options, vec!["append", "truncate-insert", "merge"]);
    }

    #[test]
    fn test_missing_category_is_empty() {
        let registry = SchemaRegistry::from_yaml_str(
            r#"
db_to_db:
  source:
    - { key: srcConn, label: Source DB Connection, input: text }
"#,
        )
        .unwrap();

        assert_eq!(registry.fields_for(Category::DbToDb).source.len(), 1);
        assert!(registry.fields_for(Category::DbToDb).destination.is_empty());
        assert!(registry.fields_for(Category::Scd).is_empty());
        assert!(registry.fields_for_name("no_such_category").is_empty());
    }

    #[test]
    fn test_legacy_names_are_normalized() {
        let registry = SchemaRegistry::from_yaml_str(
            r#"
scd_transform:
  source:
    - { key: conn, label: DB Connection, input: text }
file-to-db:
  destination:
    - { key: table, label: Target Table, input: text }
"#,
        )
        .unwrap();

        assert_eq!(registry.fields_for(Category::Scd).source[0].key, "conn");
        assert_eq!(registry.fields_for_name("scd_transform").source[0].key, "conn");
        assert_eq!(registry.fields_for(Category::FileToDb).destination[0].key, "table");
    }

    #[test]
    fn test_invalid_table_reports_every_problem() {
        let result = SchemaRegistry::from_yaml_str(
            r#"
db_to_file:
  source:
    - { key: table, label: Table, input: text }
    - { key: table, label: Table again, input: text }
  destination:
    - { key: destType, label: Destination Type, input: select }
"#,
        );

        match result {
            Err(ConfigError::InvalidSchema(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.contains(&SchemaError::DuplicateKey {
                    category: "db_to_file".to_string(),
                    section: "source",
                    key: "table".to_string(),
                }));
                assert!(errors.contains(&SchemaError::SelectWithoutOptions {
                    category: "db_to_file".to_string(),
                    section: "destination",
                    key: "destType".to_string(),
                }));
            }
            other => panic!("expected InvalidSchema, got {:?}", other),
        }
    }

    #[test]
    fn test_two_spellings_of_one_category_are_rejected() {
        let result = SchemaRegistry::from_yaml_str(
            r#"
scd:
  source:
    - { key: conn, label: DB Connection, input: text }
scd_transform:
  source:
    - { key: srcSchema, label: Source Schema, input: text }
"#,
        );

        match result {
            Err(ConfigError::InvalidSchema(errors)) => {
                assert_eq!(
                    errors,
                    vec![SchemaError::DuplicateCategory {
                        category: "scd".to_string(),
                        name: "scd_transform".to_string(),
                    }]
                );
            }
            other => panic!("expected InvalidSchema, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schemas.yaml");
        std::fs::write(
            &path,
            "transform:\n  source:\n    - { key: conn, label: Conn, input: password }\n",
        )
        .unwrap();

        let registry = SchemaRegistry::load(&path).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.fields_for(Category::Transform).source[0].input,
            InputKind::Password
        );

        let missing = SchemaRegistry::load(dir.path().join("absent.yaml"));
        assert!(matches!(missing, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn test_unknown_input_kind_is_a_parse_error() {
        let result = SchemaRegistry::from_yaml_str(
            "db_to_db:\n  source:\n    - { key: a, label: A, input: slider }\n",
        );
        assert!(matches!(result, Err(ConfigError::ParseYaml(_))));
    }
}
