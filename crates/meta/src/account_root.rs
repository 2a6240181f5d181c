//! XRP balance changes from `AccountRoot` nodes

use bigdecimal::{BigDecimal, Zero};
use ledgerdelta_core::{canonical, AmountError, DecimalArithmetic, DropsConverter, ExactDecimal};

use crate::change::{BalanceChange, NodeChange, SkipReason};
use crate::node::{field, AffectedNode};

/// Computes the XRP delta of one `AccountRoot` node.
///
/// A created account counts its whole initial balance as the change. A
/// modified or deleted account reports `final - previous`, where a missing
/// previous balance means the balance did not change.
#[derive(Debug, Clone, Default)]
pub struct AccountRootParser<A = ExactDecimal> {
    arith: A,
    drops: DropsConverter<A>,
}

impl AccountRootParser<ExactDecimal> {
    pub fn new() -> Self {
        Self::with_arithmetic(ExactDecimal)
    }
}

impl<A: DecimalArithmetic> AccountRootParser<A> {
    pub fn with_arithmetic(arith: A) -> Self {
        Self {
            drops: DropsConverter::with_arithmetic(arith.clone()),
            arith,
        }
    }

    pub fn parse(&self, node: &AffectedNode, address: &str) -> Result<NodeChange, AmountError> {
        let Some(fields) = node.current_fields() else {
            return Ok(NodeChange::malformed("AccountRoot without current fields"));
        };
        let Some(account) = field::<String>(fields, "Account") else {
            return Ok(NodeChange::malformed("AccountRoot without Account"));
        };
        if account != address {
            return Ok(NodeChange::Irrelevant(SkipReason::OtherAccount));
        }
        let Some(balance) = field::<String>(fields, "Balance") else {
            return Ok(NodeChange::malformed("AccountRoot Balance is not a drops string"));
        };

        let final_xrp = self.to_xrp(&balance)?;

        let value = match node {
            AffectedNode::Created(_) => final_xrp,
            AffectedNode::Modified(_) | AffectedNode::Deleted(_) => {
                let previous_xrp = match node
                    .previous_fields()
                    .and_then(|previous| field::<String>(previous, "Balance"))
                {
                    Some(previous) => self.to_xrp(&previous)?,
                    None => BigDecimal::zero(),
                };
                self.arith.sub(&final_xrp, &previous_xrp)?
            }
        };

        Ok(NodeChange::Change(BalanceChange::native(canonical(&value))))
    }

    fn to_xrp(&self, drops: &str) -> Result<BigDecimal, AmountError> {
        self.drops.drops_to_native(&self.arith.parse(drops)?)
    }
}
