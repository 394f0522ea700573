// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::model::RuleKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed classification of an ingestion task.
///
/// The category decides which source and destination types a task may use
/// (see [`crate::compat`]) and which rule kinds may be attached to it.
///
/// # Example
/// ```yaml
/// type: db_to_db
/// ```
///
/// Older payloads spelled some categories with dashes (`file-to-db`) or as
/// `scd_transform`; both spellings are accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[serde(alias = "file-to-db")]
    FileToDb,
    #[serde(alias = "db-to-db")]
    DbToDb,
    #[serde(alias = "db-to-file")]
    DbToFile,
    Transform,
    #[serde(alias = "scd_transform")]
    Scd,
    SqlTransform,
}

impl Category {
    /// Returns all categories in sidebar order.
    pub fn all() -> &'static [Category] {
        &[
            Category::FileToDb,
            Category::DbToDb,
            Category::DbToFile,
            Category::Transform,
            Category::Scd,
            Category::SqlTransform,
        ]
    }

    /// The snake_case name used on the wire and in schema tables.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Category::FileToDb => "file_to_db",
            Category::DbToDb => "db_to_db",
            Category::DbToFile => "db_to_file",
            Category::Transform => "transform",
            Category::Scd => "scd",
            Category::SqlTransform => "sql_transform",
        }
    }

    /// Human label shown in the module sidebar and task table.
    pub fn label(&self) -> &'static str {
        match self {
            Category::FileToDb => "File → DB",
            Category::DbToDb => "DB → DB",
            Category::DbToFile => "DB → File",
            Category::Transform => "Transform Only",
            Category::Scd => "SCD Transformation",
            Category::SqlTransform => "SQL Transformation",
        }
    }

    /// Rule kinds that may be added to a task of this category.
    pub fn rule_kinds(&self) -> &'static [RuleKind] {
        match self {
            Category::Transform => &[
                RuleKind::Map,
                RuleKind::Cast,
                RuleKind::Filter,
                RuleKind::Lookup,
            ],
            Category::Scd => &[RuleKind::Scd1, RuleKind::Scd2, RuleKind::Scd3],
            _ => &[],
        }
    }

    pub fn allows_rule(&self, kind: RuleKind) -> bool {
        self.rule_kinds().contains(&kind)
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::FileToDb
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "file_to_db" => Ok(Category::FileToDb),
            "db_to_db" => Ok(Category::DbToDb),
            "db_to_file" => Ok(Category::DbToFile),
            "transform" => Ok(Category::Transform),
            "scd" | "scd_transform" => Ok(Category::Scd),
            "sql_transform" => Ok(Category::SqlTransform),
            _ => Err(format!("Unknown task category: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip_through_from_str() {
        for category in Category::all() {
            let parsed: Category = category.wire_name().parse().unwrap();
            assert_eq!(parsed, *category);
        }
    }

    #[test]
    fn test_legacy_spellings_are_accepted() {
        let cases = vec![
            ("\"file-to-db\"", Category::FileToDb),
            ("\"db-to-db\"", Category::DbToDb),
            ("\"db-to-file\"", Category::DbToFile),
            ("\"scd_transform\"", Category::Scd),
            ("\"sql_transform\"", Category::SqlTransform),
        ];

        for (json, expected) in cases {
            let parsed: Category = serde_json::from_str(json).unwrap();
            assert_eq!(parsed, expected, "parsing {}", json);
        }

        assert_eq!("SCD_TRANSFORM".parse::<Category>().unwrap(), Category::Scd);
        assert!("kafka_to_lake".parse::<Category>().is_err());
    }

    #[test]
    fn test_rule_kind_gating() {
        assert!(Category::Transform.allows_rule(RuleKind::Lookup));
        assert!(!Category::Transform.allows_rule(RuleKind::Scd2));
        assert!(Category::Scd.allows_rule(RuleKind::Scd3));
        assert!(!Category::Scd.allows_rule(RuleKind::Map));

        for category in [Category::FileToDb, Category::DbToDb, Category::DbToFile, Category::SqlTransform] {
            assert!(category.rule_kinds().is_empty(), "{} should not accept rules", category);
        }
    }
}
