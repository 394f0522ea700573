// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::model::{Category, Destination, DestinationType, Source, SourceType};

const DATABASES: &[SourceType] = &[SourceType::Mssql, SourceType::Postgres];
const FILES: &[SourceType] = &[SourceType::Csv, SourceType::Txt];
const DATABASE_TARGETS: &[DestinationType] = &[DestinationType::Mssql, DestinationType::Postgres];
const FILE_TARGETS: &[DestinationType] = &[
    DestinationType::File,
    DestinationType::Txt,
    DestinationType::S3,
];

/// Source types a task of `category` may read from. Never empty; the first
/// entry is the default used when a task has to be corrected.
pub fn allowed_sources(category: Category) -> &'static [SourceType] {
    match category {
        Category::FileToDb => FILES,
        Category::DbToDb
        | Category::DbToFile
        | Category::Transform
        | Category::Scd
        | Category::SqlTransform => DATABASES,
    }
}

/// Destination types a task of `category` may write to. Never empty.
pub fn allowed_destinations(category: Category) -> &'static [DestinationType] {
    match category {
        Category::DbToFile => FILE_TARGETS,
        Category::FileToDb
        | Category::DbToDb
        | Category::Transform
        | Category::Scd
        | Category::SqlTransform => DATABASE_TARGETS,
    }
}

/// A fresh record of the first type `category` may read from.
pub fn default_source(category: Category) -> Source {
    let source_type = allowed_sources(category)
        .first()
        .copied()
        .unwrap_or(SourceType::Mssql);
    Source::default_for(source_type)
}

/// A fresh record of the first type `category` may write to.
pub fn default_destination(category: Category) -> Destination {
    let destination_type = allowed_destinations(category)
        .first()
        .copied()
        .unwrap_or(DestinationType::Mssql);
    Destination::default_for(destination_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_options() {
        for category in Category::all() {
            assert!(!allowed_sources(*category).is_empty(), "{} sources", category);
            assert!(!allowed_destinations(*category).is_empty(), "{} destinations", category);
        }
    }

    #[test]
    fn test_table_contents() {
        struct TestCase {
            category: Category,
            sources: Vec<SourceType>,
            destinations: Vec<DestinationType>,
        }

        let test_cases = vec![
            TestCase {
                category: Category::FileToDb,
                sources: vec![SourceType::Csv, SourceType::Txt],
                destinations: vec![DestinationType::Mssql, DestinationType::Postgres],
            },
            TestCase {
                category: Category::DbToDb,
                sources: vec![SourceType::Mssql, SourceType::Postgres],
                destinations: vec![DestinationType::Mssql, DestinationType::Postgres],
            },
            TestCase {
                category: Category::DbToFile,
                sources: vec![SourceType::Mssql, SourceType::Postgres],
                destinations: vec![DestinationType::File, DestinationType::Txt, DestinationType::S3],
            },
            TestCase {
                category: Category::SqlTransform,
                sources: vec![SourceType::Mssql, SourceType::Postgres],
                destinations: vec![DestinationType::Mssql, DestinationType::Postgres],
            },
        ];

        for case in test_cases {
            assert_eq!(allowed_sources(case.category), case.sources.as_slice(), "{}", case.category);
            assert_eq!(
                allowed_destinations(case.category),
                case.destinations.as_slice(),
                "{}",
                case.category
            );
        }
    }

    #[test]
    fn test_default_records_use_first_allowed_type() {
        assert_eq!(
            default_source(Category::FileToDb),
            Source::default_for(SourceType::Csv)
        );
        assert_eq!(
            default_source(Category::DbToDb),
            Source::default_for(SourceType::Mssql)
        );
        assert_eq!(
            default_destination(Category::DbToFile),
            Destination::default_for(DestinationType::File)
        );
    }
}
