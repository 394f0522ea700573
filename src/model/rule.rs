// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Transformation and SCD rules attached to a task.
//!
//! A rule is an id plus a [`RuleBody`] tagged by `kind`. Each kind has its own
//! field set; there is no shared bag of optional fields. Rules only capture
//! configuration, so field values are never checked beyond being present.
//!
//! # Wire format
//! ```json
//! { "id": "b1f0...", "kind": "scd2", "businessKeys": "customer_id",
//!   "effectiveDateCol": "valid_from", "expiryDateCol": "valid_to", "currentFlagCol": "is_current" }
//! ```

use crate::model::ids::RuleId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Map,
    Cast,
    Filter,
    Lookup,
    Scd1,
    Scd2,
    Scd3,
}

impl RuleKind {
    pub fn all() -> &'static [RuleKind] {
        &[
            RuleKind::Map,
            RuleKind::Cast,
            RuleKind::Filter,
            RuleKind::Lookup,
            RuleKind::Scd1,
            RuleKind::Scd2,
            RuleKind::Scd3,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            RuleKind::Map => "Map",
            RuleKind::Cast => "Cast",
            RuleKind::Filter => "Filter",
            RuleKind::Lookup => "Lookup",
            RuleKind::Scd1 => "SCD Type 1",
            RuleKind::Scd2 => "SCD Type 2",
            RuleKind::Scd3 => "SCD Type 3",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleKind::Map => "map",
            RuleKind::Cast => "cast",
            RuleKind::Filter => "filter",
            RuleKind::Lookup => "lookup",
            RuleKind::Scd1 => "scd1",
            RuleKind::Scd2 => "scd2",
            RuleKind::Scd3 => "scd3",
        };
        f.write_str(name)
    }
}

/// Kind-specific rule fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RuleBody {
    Map {
        #[serde(default)]
        from: String,
        #[serde(default)]
        to: String,
    },
    Cast {
        #[serde(default)]
        column: String,
        #[serde(default)]
        datatype: String,
    },
    Filter {
        #[serde(default)]
        expression: String,
    },
    Lookup {
        #[serde(default)]
        column: String,
        #[serde(default, rename = "ref")]
        reference: String,
        #[serde(default)]
        key: String,
        #[serde(default)]
        select: String,
    },
    #[serde(rename_all = "camelCase")]
    Scd1 {
        #[serde(default)]
        business_keys: String,
    },
    #[serde(rename_all = "camelCase")]
    Scd2 {
        #[serde(default)]
        business_keys: String,
        #[serde(default)]
        effective_date_col: String,
        #[serde(default)]
        expiry_date_col: String,
        #[serde(default)]
        current_flag_col: String,
    },
    #[serde(rename_all = "camelCase")]
    Scd3 {
        #[serde(default)]
        business_keys: String,
        #[serde(default)]
        current_col: String,
        #[serde(default)]
        previous_col: String,
    },
}

impl RuleBody {
    /// A body of the given kind with every field empty.
    pub fn default_for(kind: RuleKind) -> Self {
        match kind {
            RuleKind::Map => RuleBody::Map {
                from: String::new(),
                to: String::new(),
            },
            RuleKind::Cast => RuleBody::Cast {
                column: String::new(),
                datatype: String::new(),
            },
            RuleKind::Filter => RuleBody::Filter {
                expression: String::new(),
            },
            RuleKind::Lookup => RuleBody::Lookup {
                column: String::new(),
                reference: String::new(),
                key: String::new(),
                select: String::new(),
            },
            RuleKind::Scd1 => RuleBody::Scd1 {
                business_keys: String::new(),
            },
            RuleKind::Scd2 => RuleBody::Scd2 {
                business_keys: String::new(),
                effective_date_col: String::new(),
                expiry_date_col: String::new(),
                current_flag_col: String::new(),
            },
            RuleKind::Scd3 => RuleBody::Scd3 {
                business_keys: String::new(),
                current_col: String::new(),
                previous_col: String::new(),
            },
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            RuleBody::Map { .. } => RuleKind::Map,
            RuleBody::Cast { .. } => RuleKind::Cast,
            RuleBody::Filter { .. } => RuleKind::Filter,
            RuleBody::Lookup { .. } => RuleKind::Lookup,
            RuleBody::Scd1 { .. } => RuleKind::Scd1,
            RuleBody::Scd2 { .. } => RuleKind::Scd2,
            RuleBody::Scd3 { .. } => RuleKind::Scd3,
        }
    }

    /// Set one field by its wire name. Unknown keys are ignored and reported
    /// as `false`.
    pub fn set_field(&mut self, key: &str, value: &str) -> bool {
        let slot = match (self, key) {
            (RuleBody::Map { from, .. }, "from") => from,
            (RuleBody::Map { to, .. }, "to") => to,
            (RuleBody::Cast { column, .. }, "column") => column,
            (RuleBody::Cast { datatype, .. }, "datatype") => datatype,
            (RuleBody::Filter { expression }, "expression") => expression,
            (RuleBody::Lookup { column, .. }, "column") => column,
            (RuleBody::Lookup { reference, .. }, "ref") => reference,
            (RuleBody::Lookup { key, .. }, "key") => key,
            (RuleBody::Lookup { select, .. }, "select") => select,
            (RuleBody::Scd1 { business_keys }, "businessKeys") => business_keys,
            (RuleBody::Scd2 { business_keys, .. }, "businessKeys") => business_keys,
            (RuleBody::Scd2 { effective_date_col, .. }, "effectiveDateCol") => effective_date_col,
            (RuleBody::Scd2 { expiry_date_col, .. }, "expiryDateCol") => expiry_date_col,
            (RuleBody::Scd2 { current_flag_col, .. }, "currentFlagCol") => current_flag_col,
            (RuleBody::Scd3 { business_keys, .. }, "businessKeys") => business_keys,
            (RuleBody::Scd3 { current_col, .. }, "currentCol") => current_col,
            (RuleBody::Scd3 { previous_col, .. }, "previousCol") => previous_col,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    #[serde(flatten)]
    pub body: RuleBody,
}

impl Rule {
    pub fn new(kind: RuleKind) -> Self {
        Self {
            id: RuleId::generate(),
            body: RuleBody::default_for(kind),
        }
    }

    pub fn kind(&self) -> RuleKind {
        self.body.kind()
    }
}

/// A shallow patch for a rule: wire field name to new value.
///
/// `id` and `kind` are never patched; use remove + add to change a kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RulePatch(pub BTreeMap<String, String>);

impl RulePatch {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

/// Ordered rules of a task. Order is application order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(pub Vec<Rule>);

impl RuleSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a default rule of `kind` and return its id.
    ///
    /// Category gating is not checked here; go through
    /// [`crate::model::Task::add_rule`] for that.
    pub fn push(&mut self, kind: RuleKind) -> RuleId {
        let rule = Rule::new(kind);
        let id = rule.id.clone();
        self.0.push(rule);
        id
    }

    /// Merge `patch` into the rule with `id`. Returns `false` when no rule has
    /// that id, in which case nothing changes.
    pub fn update(&mut self, id: &RuleId, patch: &RulePatch) -> bool {
        let Some(rule) = self.0.iter_mut().find(|r| &r.id == id) else {
            return false;
        };
        for (key, value) in &patch.0 {
            rule.body.set_field(key, value);
        }
        true
    }

    pub fn remove(&mut self, id: &RuleId) -> Option<Rule> {
        let index = self.0.iter().position(|r| &r.id == id)?;
        Some(self.0.remove(index))
    }

    pub fn get(&self, id: &RuleId) -> Option<&Rule> {
        self.0.iter().find(|r| &r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self(rules)
    }
}
