// ── Tagged union over every record kind ──
//
// Used wherever mixed records travel together (quick search results,
// mixed JSON exports). The `kind` field is the discriminator; nothing
// ever inspects the shape of a record to guess what it is.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{
    BankTransaction, Campaign, EntityId, EquityClass, Guest, Identified, Invoice, JournalEntry,
    Lead, Payment, Rate, Room, ServiceRequest, Shareholder, StaffMember,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RecordKind {
    Request,
    Staff,
    JournalEntry,
    Guest,
    Room,
    Rate,
    Invoice,
    Payment,
    BankTransaction,
    Lead,
    Campaign,
    EquityClass,
    Shareholder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeskRecord {
    Request(ServiceRequest),
    Staff(StaffMember),
    JournalEntry(JournalEntry),
    Guest(Guest),
    Room(Room),
    Rate(Rate),
    Invoice(Invoice),
    Payment(Payment),
    BankTransaction(BankTransaction),
    Lead(Lead),
    Campaign(Campaign),
    EquityClass(EquityClass),
    Shareholder(Shareholder),
}

impl DeskRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Request(_) => RecordKind::Request,
            Self::Staff(_) => RecordKind::Staff,
            Self::JournalEntry(_) => RecordKind::JournalEntry,
            Self::Guest(_) => RecordKind::Guest,
            Self::Room(_) => RecordKind::Room,
            Self::Rate(_) => RecordKind::Rate,
            Self::Invoice(_) => RecordKind::Invoice,
            Self::Payment(_) => RecordKind::Payment,
            Self::BankTransaction(_) => RecordKind::BankTransaction,
            Self::Lead(_) => RecordKind::Lead,
            Self::Campaign(_) => RecordKind::Campaign,
            Self::EquityClass(_) => RecordKind::EquityClass,
            Self::Shareholder(_) => RecordKind::Shareholder,
        }
    }

    /// Short human label for list views.
    pub fn label(&self) -> String {
        match self {
            Self::Request(r) => format!("{} · room {} · {}", r.guest_name, r.room_number, r.service_type),
            Self::Staff(s) => format!("{} ({})", s.name, s.role),
            Self::JournalEntry(j) => format!("{} {}", j.reference, j.description),
            Self::Guest(g) => g.name.clone(),
            Self::Room(r) => format!("Room {} ({})", r.number, r.room_type),
            Self::Rate(r) => format!("{} ({})", r.name, r.room_type),
            Self::Invoice(i) => format!("{} {}", i.number, i.counterparty),
            Self::Payment(p) => format!("{} {:.2}", p.reference, p.amount),
            Self::BankTransaction(t) => format!("{} {:.2}", t.description, t.amount),
            Self::Lead(l) => format!("{} ({})", l.name, l.company),
            Self::Campaign(c) => c.name.clone(),
            Self::EquityClass(e) => e.name.clone(),
            Self::Shareholder(s) => s.name.clone(),
        }
    }
}

impl Identified for DeskRecord {
    fn id(&self) -> &EntityId {
        match self {
            Self::Request(r) => r.id(),
            Self::Staff(s) => s.id(),
            Self::JournalEntry(j) => j.id(),
            Self::Guest(g) => g.id(),
            Self::Room(r) => r.id(),
            Self::Rate(r) => r.id(),
            Self::Invoice(i) => i.id(),
            Self::Payment(p) => p.id(),
            Self::BankTransaction(t) => t.id(),
            Self::Lead(l) => l.id(),
            Self::Campaign(c) => c.id(),
            Self::EquityClass(e) => e.id(),
            Self::Shareholder(s) => s.id(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::StaffMember;

    #[test]
    fn serializes_with_kind_discriminator() {
        let record = DeskRecord::Staff(StaffMember {
            id: EntityId::from("STF-9"),
            name: "Marco".into(),
            role: "Concierge".into(),
            is_available: true,
            current_assignments: 0,
        });
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "staff");
        assert_eq!(json["name"], "Marco");

        let back: DeskRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind(), RecordKind::Staff);
        assert_eq!(back.id(), &EntityId::from("STF-9"));
    }
}
