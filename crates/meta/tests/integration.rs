//! Integration tests: realistic transaction metadata -> balance changes

use bigdecimal::BigDecimal;
use ledgerdelta_core::{to_plain_string, AmountNormalizer, CurrencyAmount, DropsConverter};
use ledgerdelta_meta::{
    BalanceChange, BalanceChangeAggregator, MetaConfig, MetaError, NodeChange, SkipReason,
    Transaction,
};
use serde_json::{json, Value};

const SENDER: &str = "rPEPPER7kfTD9w2To4CQk6UCfuHM9c6GDY";
const RECEIVER: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
const GATEWAY: &str = "rMwjYedjc7qqtKYVLiAccJSmCwih4LnE2q";
const BYSTANDER: &str = "rUn84CUYbNjRoTQ6mSW7BVJPSVJNLb1QLo";
const ZERO_ACCOUNT: &str = "rrrrrrrrrrrrrrrrrrrrBZbvji";

fn dec(s: &str) -> BigDecimal {
    s.parse().unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Sender pays 10 USD to receiver through the gateway, fee 12 drops
fn usd_payment() -> Value {
    json!({
        "Account": SENDER,
        "Destination": RECEIVER,
        "Fee": "12",
        "TransactionType": "Payment",
        "hash": "F4AB442A6D4CBB935D66E1DA7309A5FC71C7143ED4049053EC14E3875B0CF9BF",
        "meta": {
            "TransactionIndex": 3,
            "TransactionResult": "tesSUCCESS",
            "AffectedNodes": [
                {
                    "ModifiedNode": {
                        "LedgerEntryType": "AccountRoot",
                        "LedgerIndex": "4F83A2CF7E70F77F79A307E6A472BFC2585B806A70833CCD1C26105BAE0D6E05",
                        "FinalFields": {"Account": SENDER, "Balance": "99999988", "Flags": 0, "OwnerCount": 1, "Sequence": 8},
                        "PreviousFields": {"Balance": "100000000", "Sequence": 7}
                    }
                },
                {
                    "ModifiedNode": {
                        "LedgerEntryType": "RippleState",
                        "LedgerIndex": "61B7D5FBC9D0A1CDAB2B1E34D0E3B1D5B6C1E0F9A2D3B4C5D6E7F8091A2B3C4D",
                        "FinalFields": {
                            "Balance": {"currency": "USD", "issuer": ZERO_ACCOUNT, "value": "40"},
                            "Flags": 65536,
                            "HighLimit": {"currency": "USD", "issuer": GATEWAY, "value": "0"},
                            "LowLimit": {"currency": "USD", "issuer": SENDER, "value": "1000"}
                        },
                        "PreviousFields": {
                            "Balance": {"currency": "USD", "issuer": ZERO_ACCOUNT, "value": "50"}
                        }
                    }
                },
                {
                    "ModifiedNode": {
                        "LedgerEntryType": "RippleState",
                        "LedgerIndex": "826CF5BFD28F3934B518D0BDF3231259CBD3FD0946E3C3CA0C97D2C75D2D1A09",
                        "FinalFields": {
                            "Balance": {"currency": "USD", "issuer": ZERO_ACCOUNT, "value": "-30"},
                            "Flags": 131072,
                            "HighLimit": {"currency": "USD", "issuer": RECEIVER, "value": "500"},
                            "LowLimit": {"currency": "USD", "issuer": GATEWAY, "value": "0"}
                        },
                        "PreviousFields": {
                            "Balance": {"currency": "USD", "issuer": ZERO_ACCOUNT, "value": "-20"}
                        }
                    }
                },
                {
                    "ModifiedNode": {
                        "LedgerEntryType": "DirectoryNode",
                        "FinalFields": {"Owner": SENDER, "RootIndex": "00"}
                    }
                }
            ]
        },
        "validated": true
    })
}

fn changes(tx: &Value, address: &str) -> Vec<BalanceChange> {
    BalanceChangeAggregator::new()
        .balance_changes_from_json(tx, address)
        .unwrap()
}

#[test]
fn test_payment_sender_sees_fee_and_usd_debit() {
    init_tracing();
    let sender = changes(&usd_payment(), SENDER);

    assert_eq!(sender.len(), 2);
    assert_eq!(sender[0].currency.code(), "XRP");
    assert_eq!(sender[0].value, dec("-0.000012"));
    assert_eq!(sender[0].issuer, "");

    assert_eq!(sender[1].currency.code(), "USD");
    assert_eq!(sender[1].value, dec("-10"));
    assert_eq!(sender[1].issuer, GATEWAY);
}

#[test]
fn test_payment_receiver_sees_usd_credit() {
    init_tracing();
    let receiver = changes(&usd_payment(), RECEIVER);

    assert_eq!(receiver.len(), 1);
    assert_eq!(receiver[0].value, dec("10"));
    assert_eq!(receiver[0].currency.code(), "USD");
    assert_eq!(receiver[0].issuer, GATEWAY);
}

#[test]
fn test_payment_gateway_nets_out() {
    init_tracing();
    let gateway = changes(&usd_payment(), GATEWAY);

    assert_eq!(gateway.len(), 1);
    assert_eq!(gateway[0].value, dec("0"));

    let omitted = BalanceChangeAggregator::new()
        .with_config(MetaConfig::default().omit_zero(true))
        .balance_changes_from_json(&usd_payment(), GATEWAY)
        .unwrap();
    assert!(omitted.is_empty());
}

#[test]
fn test_bystander_sees_nothing() {
    assert!(changes(&usd_payment(), BYSTANDER).is_empty());
}

#[test]
fn test_output_json_contract() -> anyhow::Result<()> {
    let sender = changes(&usd_payment(), SENDER);
    let json = serde_json::to_value(&sender)?;

    assert_eq!(
        json,
        json!([
            {"value": "-0.000012", "currency": "XRP", "issuer": ""},
            {"value": "-10", "currency": "USD", "issuer": GATEWAY}
        ])
    );
    Ok(())
}

#[test]
fn test_account_creation_payment() {
    let tx = json!({
        "TransactionType": "Payment",
        "meta": {
            "AffectedNodes": [
                {
                    "CreatedNode": {
                        "LedgerEntryType": "AccountRoot",
                        "LedgerIndex": "B3D2F2D1A33C8B9E5F0E2B6C7D8E9F00112233445566778899AABBCCDDEEFF00",
                        "NewFields": {"Account": RECEIVER, "Balance": "25000000", "Sequence": 1}
                    }
                },
                {
                    "ModifiedNode": {
                        "LedgerEntryType": "AccountRoot",
                        "FinalFields": {"Account": SENDER, "Balance": "74999990"},
                        "PreviousFields": {"Balance": "100000000"}
                    }
                }
            ]
        }
    });

    let receiver = changes(&tx, RECEIVER);
    assert_eq!(receiver, vec![BalanceChange::native(dec("25"))]);

    let sender = changes(&tx, SENDER);
    assert_eq!(sender, vec![BalanceChange::native(dec("-25.00001"))]);
}

#[test]
fn test_offer_crossing_merges_multiple_lines() {
    // Two USD lines for the same account touched in one transaction
    let line = |balance: &str, previous: &str, high: &str| {
        json!({
            "ModifiedNode": {
                "LedgerEntryType": "RippleState",
                "FinalFields": {
                    "Balance": {"currency": "USD", "issuer": ZERO_ACCOUNT, "value": balance},
                    "HighLimit": {"currency": "USD", "issuer": high, "value": "0"},
                    "LowLimit": {"currency": "USD", "issuer": SENDER, "value": "100"}
                },
                "PreviousFields": {
                    "Balance": {"currency": "USD", "issuer": ZERO_ACCOUNT, "value": previous}
                }
            }
        })
    };
    let tx = json!({
        "meta": {
            "AffectedNodes": [
                line("15", "10", GATEWAY),
                {"DeletedNode": {"LedgerEntryType": "Offer", "FinalFields": {"Account": BYSTANDER}}},
                line("3.5", "0.5", BYSTANDER)
            ]
        }
    });

    let merged = changes(&tx, SENDER);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].value, dec("8"));
    // Issuer of the first-seen line is kept
    assert_eq!(merged[0].issuer, GATEWAY);
}

#[test]
fn test_metadata_with_ledger_api_alias() {
    let mut tx = usd_payment();
    let meta = tx.as_object_mut().unwrap().remove("meta").unwrap();
    tx["metaData"] = meta;

    assert_eq!(changes(&tx, RECEIVER)[0].value, dec("10"));
}

#[test]
fn test_corrupt_balance_fails_whole_transaction() {
    let mut tx = usd_payment();
    tx["meta"]["AffectedNodes"][2]["ModifiedNode"]["FinalFields"]["Balance"]["value"] = json!("3O");

    let result = BalanceChangeAggregator::new().balance_changes_from_json(&tx, RECEIVER);
    assert!(matches!(result, Err(MetaError::Arithmetic(_))));
}

#[test]
fn test_node_outcomes_are_auditable() -> anyhow::Result<()> {
    let tx: Transaction = serde_json::from_value(usd_payment())?;
    let outcomes = BalanceChangeAggregator::new().node_changes(&tx, RECEIVER)?;

    assert_eq!(outcomes.len(), 4);
    assert_eq!(outcomes[0], NodeChange::Irrelevant(SkipReason::OtherAccount));
    assert_eq!(outcomes[1], NodeChange::Irrelevant(SkipReason::OtherAccount));
    assert!(matches!(outcomes[2], NodeChange::Change(_)));
    assert_eq!(
        outcomes[3],
        NodeChange::Irrelevant(SkipReason::UnsupportedEntryType("DirectoryNode".to_string()))
    );
    Ok(())
}

#[test]
fn test_delivered_amount_normalization() -> anyhow::Result<()> {
    let normalizer = AmountNormalizer::new();

    let xrp: CurrencyAmount = serde_json::from_value(json!("1000000"))?;
    let canonical = normalizer.to_canonical(&xrp)?;
    assert!(canonical.currency.is_native());
    assert_eq!(canonical.value, "1");
    assert_eq!(normalizer.to_wire(&canonical)?, xrp);

    let usd: CurrencyAmount =
        serde_json::from_value(json!({"currency": "USD", "issuer": GATEWAY, "value": "10"}))?;
    let canonical = normalizer.to_canonical(&usd)?;
    assert_eq!(canonical.counterparty, GATEWAY);
    assert_eq!(normalizer.to_wire(&canonical)?, usd);
    Ok(())
}

#[test]
fn test_drops_roundtrip_matches_aggregated_fee() -> anyhow::Result<()> {
    let sender = changes(&usd_payment(), SENDER);
    let fee = DropsConverter::new().to_minor_units(&to_plain_string(&sender[0].value))?;
    assert_eq!(fee, "-12");
    Ok(())
}

#[test]
fn test_trust_line_limits_without_currency_code() {
    init_tracing();
    let tx = json!({
        "meta": {"AffectedNodes": [{
            "ModifiedNode": {
                "LedgerEntryType": "RippleState",
                "FinalFields": {
                    "Balance": {"currency": "USD", "issuer": ZERO_ACCOUNT, "value": "10"},
                    "HighLimit": {"issuer": "B", "value": "0"},
                    "LowLimit": {"issuer": "A", "value": "0"}
                },
                "PreviousFields": {
                    "Balance": {"currency": "USD", "issuer": ZERO_ACCOUNT, "value": "0"}
                }
            }
        }]}
    });

    let changes = BalanceChangeAggregator::new()
        .with_config(MetaConfig::default().strict(true))
        .balance_changes_from_json(&tx, "A")
        .unwrap();
    assert_eq!(
        serde_json::to_value(&changes).unwrap(),
        json!([{"value": "10", "currency": "USD", "issuer": "A"}])
    );
}

#[test]
fn test_null_affected_nodes_yields_no_changes() {
    let tx = json!({"hash": "ABC", "meta": {"TransactionResult": "tesSUCCESS", "AffectedNodes": null}});
    assert!(changes(&tx, SENDER).is_empty());
}

#[test]
fn test_trust_line_delta_keeps_every_digit() {
    let tx = json!({
        "meta": {"AffectedNodes": [{
            "ModifiedNode": {
                "LedgerEntryType": "RippleState",
                "FinalFields": {
                    "Balance": {"currency": "USD", "issuer": ZERO_ACCOUNT, "value": "10000000000000000000"},
                    "HighLimit": {"currency": "USD", "issuer": GATEWAY, "value": "0"},
                    "LowLimit": {"currency": "USD", "issuer": SENDER, "value": "1000"}
                },
                "PreviousFields": {
                    "Balance": {"currency": "USD", "issuer": ZERO_ACCOUNT, "value": "0.0000000001"}
                }
            }
        }]}
    });

    let json = serde_json::to_value(changes(&tx, SENDER)).unwrap();
    assert_eq!(
        json,
        json!([{"value": "9999999999999999999.9999999999", "currency": "USD", "issuer": GATEWAY}])
    );
}
