// ── Payments and bank statement lines ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::entity_id::{EntityId, Identified};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum PaymentMethod {
    #[default]
    Card,
    Cash,
    #[serde(rename = "Bank Transfer")]
    #[strum(to_string = "Bank Transfer", serialize = "transfer")]
    BankTransfer,
    Cheque,
    Other,
}

/// A payment recorded against an invoice (or unapplied).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: EntityId,
    #[serde(default)]
    pub invoice_id: Option<EntityId>,
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default)]
    pub reference: String,
}

impl Identified for Payment {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// A line imported from a bank statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankTransaction {
    pub id: EntityId,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    #[serde(default)]
    pub reconciled_payment_id: Option<EntityId>,
}

impl BankTransaction {
    pub fn is_reconciled(&self) -> bool {
        self.reconciled_payment_id.is_some()
    }
}

impl Identified for BankTransaction {
    fn id(&self) -> &EntityId {
        &self.id
    }
}
