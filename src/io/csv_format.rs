//! CSV format handling for operation records and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - OpCsvRecord structure for deserialization
//! - Conversion from CSV records to domain types
//! - Account state output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{Account, OperationRecord, OperationType, UserId};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the replay input format with columns:
/// `op,identity,name,coin,amount,email`. All columns after `identity`
/// are optional; which ones are required depends on the operation.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OpCsvRecord {
    pub op: String,
    pub identity: UserId,
    pub name: Option<String>,
    pub coin: Option<String>,
    pub amount: Option<String>,
    pub email: Option<String>,
}

/// Treat empty and whitespace-only CSV fields as absent
fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}

/// Convert an OpCsvRecord to an OperationRecord
///
/// This function:
/// - Parses the operation string into an OperationType (case-insensitive)
/// - Parses the amount string into a Decimal (if present)
/// - Validates that withdrawals carry coin, amount, and email
///
/// # Returns
///
/// Result containing either:
/// - Ok(OperationRecord) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_op_record(csv_record: OpCsvRecord) -> Result<OperationRecord, String> {
    let op = match csv_record.op.to_lowercase().as_str() {
        "login" => OperationType::Login,
        "collect" => OperationType::Collect,
        "ad" => OperationType::WatchAd,
        "withdraw" => OperationType::Withdraw,
        _ => {
            return Err(format!(
                "Invalid operation type: '{}' for identity {}",
                csv_record.op, csv_record.identity
            ))
        }
    };

    let name = non_empty(csv_record.name);
    let coin = non_empty(csv_record.coin);
    let email = non_empty(csv_record.email);

    // Parse amount if present
    let amount = match non_empty(csv_record.amount) {
        Some(amount_str) => match Decimal::from_str(amount_str.trim()) {
            Ok(decimal) => Some(decimal),
            Err(_) => {
                return Err(format!(
                    "Invalid amount '{}' for identity {}",
                    amount_str, csv_record.identity
                ))
            }
        },
        None => None,
    };

    // Withdrawals need all three payout fields up front; other operations
    // simply ignore whatever extras the row carries
    if op == OperationType::Withdraw {
        for (field, present) in [
            ("coin", coin.is_some()),
            ("amount", amount.is_some()),
            ("email", email.is_some()),
        ] {
            if !present {
                return Err(format!(
                    "withdraw operation for identity {} is missing required field '{}'",
                    csv_record.identity, field
                ));
            }
        }
    }

    Ok(OperationRecord {
        op,
        identity: csv_record.identity,
        name,
        coin,
        amount,
        email,
    })
}

/// Write account states to CSV format
///
/// Writes accounts with columns: identity, name, balance, status, email.
/// Accounts are sorted by identity and balances are formatted with four
/// decimal places for deterministic output.
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["identity", "name", "balance", "status", "email"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by_key(|account| account.identity);

    for account in sorted_accounts {
        writer
            .write_record(&[
                account.identity.to_string(),
                account.name.clone(),
                format!("{:.4}", account.balance),
                account.status.to_string(),
                account.email.clone(),
            ])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
