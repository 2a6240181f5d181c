//! Balance change aggregation over a whole transaction
//!
//! Every affected node is dispatched on its entry type, then the per-node
//! changes are summed per currency in first-seen order.

use bigdecimal::Zero;
use ledgerdelta_core::{canonical, AmountError, DecimalArithmetic, ExactDecimal};
use serde::Deserialize;
use serde_json::Value;

use crate::account_root::AccountRootParser;
use crate::change::{BalanceChange, NodeChange, SkipReason};
use crate::config::MetaConfig;
use crate::error::MetaError;
use crate::node::{AffectedNode, LedgerEntryType, Transaction};
use crate::trust_line::TrustLineParser;

/// Extracts per-currency balance changes for one account.
///
/// Stateless; one aggregator can serve any number of transactions.
///
/// # Example
/// ```
/// use ledgerdelta_meta::{BalanceChangeAggregator, Transaction};
///
/// let tx: Transaction = serde_json::from_str(r#"{
///     "meta": {"AffectedNodes": [{"ModifiedNode": {
///         "LedgerEntryType": "AccountRoot",
///         "FinalFields": {"Account": "rAlice", "Balance": "1500000"},
///         "PreviousFields": {"Balance": "2000000"}
///     }}]}
/// }"#).unwrap();
///
/// let changes = BalanceChangeAggregator::new().balance_changes(&tx, "rAlice").unwrap();
/// assert_eq!(ledgerdelta_core::to_plain_string(&changes[0].value), "-0.5");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BalanceChangeAggregator<A = ExactDecimal> {
    config: MetaConfig,
    arith: A,
    account_root: AccountRootParser<A>,
    trust_line: TrustLineParser<A>,
}

impl BalanceChangeAggregator<ExactDecimal> {
    pub fn new() -> Self {
        Self::with_arithmetic(ExactDecimal)
    }
}

impl<A: DecimalArithmetic> BalanceChangeAggregator<A> {
    pub fn with_arithmetic(arith: A) -> Self {
        Self {
            config: MetaConfig::default(),
            account_root: AccountRootParser::with_arithmetic(arith.clone()),
            trust_line: TrustLineParser::with_arithmetic(arith.clone()),
            arith,
        }
    }

    pub fn with_config(mut self, config: MetaConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &MetaConfig {
        &self.config
    }

    /// Outcome of a single node
    pub fn node_change(
        &self,
        node: &AffectedNode,
        address: &str,
    ) -> Result<NodeChange, AmountError> {
        match node.entry_type() {
            Some(LedgerEntryType::AccountRoot) => self.account_root.parse(node, address),
            Some(LedgerEntryType::RippleState) => self.trust_line.parse(node, address),
            None => Ok(NodeChange::Irrelevant(SkipReason::UnsupportedEntryType(
                node.fields().ledger_entry_type.clone(),
            ))),
        }
    }

    /// Per-node outcomes in metadata order, before merging.
    pub fn node_changes(
        &self,
        tx: &Transaction,
        address: &str,
    ) -> Result<Vec<NodeChange>, MetaError> {
        let mut outcomes = Vec::with_capacity(tx.affected_nodes().len());

        for (index, raw) in tx.affected_nodes().iter().enumerate() {
            let outcome = match AffectedNode::decode(raw) {
                Ok(node) => self.node_change(&node, address).map_err(|e| {
                    tracing::warn!(index, error = %e, "Arithmetic failure, aborting");
                    MetaError::Arithmetic(e)
                })?,
                Err(_) => NodeChange::malformed("unrecognized node wrapper"),
            };

            match &outcome {
                NodeChange::Irrelevant(SkipReason::MalformedShape(reason)) => {
                    if self.config.strict_node_shapes {
                        return Err(MetaError::MalformedNode {
                            index,
                            reason: *reason,
                        });
                    }
                    tracing::debug!(index, reason = *reason, "Skipping malformed node");
                }
                NodeChange::Irrelevant(SkipReason::UnsupportedEntryType(kind)) => {
                    tracing::trace!(index, entry_type = %kind, "Skipping entry type");
                }
                NodeChange::Irrelevant(SkipReason::OtherAccount) => {
                    tracing::trace!(index, "Node not owned by account");
                }
                NodeChange::Change(_) => {}
            }

            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// Net change per currency for `address`, in first-seen currency order.
    ///
    /// Changes for the same currency code are summed. Any arithmetic failure
    /// fails the whole call; no partial list is returned.
    pub fn balance_changes(
        &self,
        tx: &Transaction,
        address: &str,
    ) -> Result<Vec<BalanceChange>, MetaError> {
        let mut merged: Vec<BalanceChange> = Vec::new();

        for change in self
            .node_changes(tx, address)?
            .into_iter()
            .filter_map(NodeChange::into_change)
        {
            match merged.iter_mut().find(|c| c.currency == change.currency) {
                Some(existing) => {
                    let sum = self.arith.add(&existing.value, &change.value)?;
                    tracing::trace!(
                        currency = %change.currency,
                        previous = %existing.value,
                        added = %change.value,
                        "Merging balance change"
                    );
                    existing.value = canonical(&sum);
                }
                None => merged.push(change),
            }
        }

        if self.config.omit_zero_changes {
            merged.retain(|change| !change.value.is_zero());
        }

        Ok(merged)
    }

    /// Same as [`Self::balance_changes`] for a raw JSON transaction.
    pub fn balance_changes_from_json(
        &self,
        tx: &Value,
        address: &str,
    ) -> Result<Vec<BalanceChange>, MetaError> {
        let tx = Transaction::deserialize(tx)
            .map_err(|e| MetaError::InvalidTransaction(e.to_string()))?;
        self.balance_changes(&tx, address)
    }
}
