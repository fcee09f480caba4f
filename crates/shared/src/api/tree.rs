use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::api::sobject::{ApiError, Record};
use crate::constants::{MAX_TREE_DEPTH, MAX_TREE_RECORDS, MAX_TREE_TYPES};
use crate::error::DemoError;
use crate::ids::{RecordId, ReferenceId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeAttributes {
    #[serde(rename = "type")]
    pub sobject: String,
    pub reference_id: ReferenceId,
}

/// Child records under one relationship name, e.g. `Contacts`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeChildren {
    pub records: Vec<TreeRecord>,
}

/// A record plus its nested child relationships.
///
/// Serializes to the flat shape the tree resource expects: `attributes`,
/// then the record's fields, then one key per child relationship.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeRecord {
    pub attributes: TreeAttributes,
    #[serde(flatten)]
    pub fields: Record,
    #[serde(flatten)]
    pub children: BTreeMap<String, TreeChildren>,
}

impl TreeRecord {
    pub fn new(sobject: impl Into<String>, reference_id: ReferenceId) -> Self {
        Self {
            attributes: TreeAttributes {
                sobject: sobject.into(),
                reference_id,
            },
            fields: Record::new(),
            children: BTreeMap::new(),
        }
    }

    pub fn field(mut self, name: &str, value: impl Into<serde_json::Value>) -> Self {
        self.fields = self.fields.field(name, value);
        self
    }

    pub fn date(mut self, name: &str, date: chrono::NaiveDate) -> Self {
        self.fields = self.fields.date(name, date);
        self
    }

    /// Attach child records under a relationship name.
    pub fn children(mut self, relationship: &str, records: Vec<TreeRecord>) -> Self {
        self.children
            .entry(relationship.to_string())
            .or_insert_with(|| TreeChildren {
                records: Vec::new(),
            })
            .records
            .extend(records);
        self
    }

    /// Push this record and all descendants with their depth (root = 1).
    fn flatten_into<'a>(&'a self, depth: usize, out: &mut Vec<(&'a TreeRecord, usize)>) {
        out.push((self, depth));
        for child in self.children.values().flat_map(|c| c.records.iter()) {
            child.flatten_into(depth + 1, out);
        }
    }
}

/// Body of `POST /services/data/vXX.X/composite/tree/{sobject}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeRequest {
    pub records: Vec<TreeRecord>,
}

impl TreeRequest {
    pub fn new(records: Vec<TreeRecord>) -> Self {
        Self { records }
    }

    /// Check record count, depth, type count and reference id uniqueness.
    ///
    /// `root_type` is the sObject named in the request URL; every root
    /// record must be of that type.
    pub fn validate(&self, root_type: &str) -> Result<(), DemoError> {
        if self.records.is_empty() {
            return Err(DemoError::Validation("tree request has no records".into()));
        }
        if let Some(root) = self
            .records
            .iter()
            .find(|r| r.attributes.sobject != root_type)
        {
            return Err(DemoError::Validation(format!(
                "root record {} is a {}, expected {root_type}",
                root.attributes.reference_id, root.attributes.sobject
            )));
        }

        let all = self.all_records();
        let count = all.len();
        let max_depth = all.iter().map(|(_, depth)| *depth).max().unwrap_or(0);
        let mut types: HashSet<&str> = HashSet::new();
        let mut refs: HashSet<&str> = HashSet::new();
        for (record, _) in &all {
            types.insert(record.attributes.sobject.as_str());
            let reference_id = record.attributes.reference_id.as_str();
            if !refs.insert(reference_id) {
                return Err(DemoError::Validation(format!(
                    "duplicate reference id {reference_id}"
                )));
            }
        }

        if count > MAX_TREE_RECORDS {
            return Err(DemoError::Validation(format!(
                "tree request has {count} records, limit is {MAX_TREE_RECORDS}"
            )));
        }
        if max_depth > MAX_TREE_DEPTH {
            return Err(DemoError::Validation(format!(
                "tree is {max_depth} levels deep, limit is {MAX_TREE_DEPTH}"
            )));
        }
        if types.len() > MAX_TREE_TYPES {
            return Err(DemoError::Validation(format!(
                "tree request uses {} sObject types, limit is {MAX_TREE_TYPES}",
                types.len()
            )));
        }
        Ok(())
    }

    fn all_records(&self) -> Vec<(&TreeRecord, usize)> {
        let mut out = Vec::new();
        for root in &self.records {
            root.flatten_into(1, &mut out);
        }
        out
    }
}

/// Per-record outcome in a tree response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeResult {
    pub reference_id: String,
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub errors: Option<Vec<ApiError>>,
}

/// Response of the tree resource, on success (201) and on save errors (400).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeResponse {
    pub has_errors: bool,
    pub results: Vec<TreeResult>,
}
