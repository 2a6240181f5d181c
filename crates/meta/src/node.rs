//! Affected nodes - ledger entries touched by a transaction
//!
//! Metadata lists each touched entry wrapped in exactly one of
//! `CreatedNode`, `ModifiedNode` or `DeletedNode`. The wrapper is resolved
//! into `AffectedNode` once, at decode time.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use strum_macros::{Display, EnumString};

/// Ledger-native field map (`NewFields`, `FinalFields`, `PreviousFields`)
pub type FieldMap = Map<String, Value>;

/// Entry types that can carry a balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
pub enum LedgerEntryType {
    /// Account root, holds the XRP balance in drops
    AccountRoot,
    /// Trust line between two accounts, holds an issued-currency balance
    RippleState,
}

/// Body shared by all three node wrappers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NodeFields {
    pub ledger_entry_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_index: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_fields: Option<FieldMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_fields: Option<FieldMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_fields: Option<FieldMap>,
}

/// One entry of `AffectedNodes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AffectedNode {
    #[serde(rename = "CreatedNode")]
    Created(NodeFields),

    #[serde(rename = "ModifiedNode")]
    Modified(NodeFields),

    #[serde(rename = "DeletedNode")]
    Deleted(NodeFields),
}

impl AffectedNode {
    /// Decode one raw `AffectedNodes` element
    pub fn decode(raw: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(raw)
    }

    pub fn fields(&self) -> &NodeFields {
        match self {
            AffectedNode::Created(fields)
            | AffectedNode::Modified(fields)
            | AffectedNode::Deleted(fields) => fields,
        }
    }

    /// `None` for entry types we do not parse
    pub fn entry_type(&self) -> Option<LedgerEntryType> {
        self.fields().ledger_entry_type.parse().ok()
    }

    /// State of the entry after the transaction: `NewFields` for a created
    /// entry, `FinalFields` otherwise.
    pub fn current_fields(&self) -> Option<&FieldMap> {
        match self {
            AffectedNode::Created(fields) => fields.new_fields.as_ref(),
            AffectedNode::Modified(fields) | AffectedNode::Deleted(fields) => {
                fields.final_fields.as_ref()
            }
        }
    }

    /// Prior values of fields the transaction changed
    pub fn previous_fields(&self) -> Option<&FieldMap> {
        self.fields().previous_fields.as_ref()
    }
}

/// Typed read of one field; `None` when absent or of the wrong shape.
pub(crate) fn field<T: DeserializeOwned>(map: &FieldMap, key: &str) -> Option<T> {
    map.get(key).and_then(|value| T::deserialize(value).ok())
}

/// Transaction as returned by the ledger, reduced to what we read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    #[serde(default, alias = "metaData", skip_serializing_if = "Option::is_none")]
    pub meta: Option<TransactionMeta>,
}

/// Execution metadata
///
/// Nodes are kept raw so that one unreadable wrapper does not make the
/// whole transaction undecodable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionMeta {
    #[serde(rename = "AffectedNodes", default, deserialize_with = "null_as_empty")]
    pub affected_nodes: Vec<Value>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    Option::<Vec<Value>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Transaction {
    /// Raw affected nodes, empty when metadata is missing
    pub fn affected_nodes(&self) -> &[Value] {
        self.meta
            .as_ref()
            .map(|meta| meta.affected_nodes.as_slice())
            .unwrap_or_default()
    }
}
