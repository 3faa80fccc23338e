// ── CSV / JSON export ──
//
// CSV: header row, then one row per record, every field double-quoted,
// comma separated, `\n` line endings. JSON: pretty serde output of the
// records as stored.

use std::sync::Arc;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{Campaign, Guest, Holding, Invoice, Lead, ServiceRequest};

/// A record with a fixed CSV layout.
pub trait CsvRecord {
    const HEADER: &'static [&'static str];

    fn csv_row(&self) -> Vec<String>;
}

impl<T: CsvRecord> CsvRecord for Arc<T> {
    const HEADER: &'static [&'static str] = T::HEADER;

    fn csv_row(&self) -> Vec<String> {
        T::csv_row(self)
    }
}

fn money(v: f64) -> String {
    format!("{v:.2}")
}

impl CsvRecord for Holding {
    const HEADER: &'static [&'static str] = &[
        "Name",
        "Email",
        "Shares Held",
        "Ownership %",
        "Equity Type",
        "Join Date",
    ];

    fn csv_row(&self) -> Vec<String> {
        let s = &self.shareholder;
        vec![
            s.name.clone(),
            s.email.clone(),
            s.shares_held.to_string(),
            format!("{:.2}", self.ownership_pct),
            s.equity_type.to_string(),
            s.join_date.to_string(),
        ]
    }
}

impl CsvRecord for ServiceRequest {
    const HEADER: &'static [&'static str] = &[
        "ID",
        "Guest",
        "Room",
        "Service",
        "Priority",
        "Status",
        "Requested At",
        "ETA",
        "Assigned Staff",
        "Notes",
    ];

    fn csv_row(&self) -> Vec<String> {
        let staff: Vec<String> = self
            .assigned_staff_ids
            .iter()
            .map(ToString::to_string)
            .collect();
        vec![
            self.id.to_string(),
            self.guest_name.clone(),
            self.room_number.clone(),
            self.service_type.to_string(),
            self.priority.to_string(),
            self.status.to_string(),
            self.requested_at.to_rfc3339(),
            self.eta.map(|t| t.to_rfc3339()).unwrap_or_default(),
            staff.join(";"),
            self.notes.clone(),
        ]
    }
}

impl CsvRecord for Guest {
    const HEADER: &'static [&'static str] = &[
        "Name",
        "Email",
        "Phone",
        "Room",
        "Check In",
        "Check Out",
        "Nights",
        "Status",
        "VIP",
        "Total Spent",
    ];

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.room_number.clone().unwrap_or_default(),
            self.check_in.to_string(),
            self.check_out.to_string(),
            self.nights().to_string(),
            self.status.to_string(),
            if self.vip { "Yes" } else { "No" }.to_owned(),
            money(self.total_spent),
        ]
    }
}

impl CsvRecord for Invoice {
    const HEADER: &'static [&'static str] = &[
        "Number",
        "Type",
        "Counterparty",
        "Issue Date",
        "Due Date",
        "Subtotal",
        "Tax",
        "Total",
        "Paid",
        "Balance Due",
        "Status",
    ];

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.number.clone(),
            self.side.to_string(),
            self.counterparty.clone(),
            self.issue_date.to_string(),
            self.due_date.to_string(),
            money(self.subtotal()),
            money(self.tax()),
            money(self.total()),
            money(self.amount_paid),
            money(self.balance_due()),
            self.status.to_string(),
        ]
    }
}

impl CsvRecord for Lead {
    const HEADER: &'static [&'static str] = &[
        "Name",
        "Company",
        "Email",
        "Phone",
        "Source",
        "Status",
        "Estimated Value",
        "Probability %",
        "Weighted Value",
        "Created",
    ];

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.company.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.source.to_string(),
            self.status.to_string(),
            money(self.estimated_value),
            format!("{:.0}", self.probability_pct),
            money(self.weighted_value()),
            self.created_at.date_naive().to_string(),
        ]
    }
}

impl CsvRecord for Campaign {
    const HEADER: &'static [&'static str] = &[
        "Name",
        "Channel",
        "Status",
        "Start Date",
        "End Date",
        "Budget",
        "Spent",
        "Sent",
        "Opened",
        "Clicked",
        "Conversions",
        "Open Rate %",
        "Click Rate %",
        "Conversion Rate %",
    ];

    fn csv_row(&self) -> Vec<String> {
        let date = |d: Option<chrono::NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
        vec![
            self.name.clone(),
            self.channel.to_string(),
            self.status.to_string(),
            date(self.start_date),
            date(self.end_date),
            money(self.budget),
            money(self.spent),
            self.sent.to_string(),
            self.opened.to_string(),
            self.clicked.to_string(),
            self.conversions.to_string(),
            format!("{:.1}", self.open_rate()),
            format!("{:.1}", self.click_rate()),
            format!("{:.1}", self.conversion_rate()),
        ]
    }
}

/// Render `rows` as CSV with every field quoted.
pub fn to_csv<'a, T>(rows: impl IntoIterator<Item = &'a T>) -> Result<String, CoreError>
where
    T: CsvRecord + 'a,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(T::HEADER)?;
    let mut count = 0usize;
    for row in rows {
        writer.write_record(row.csv_row())?;
        count += 1;
    }

    let bytes = writer.into_inner().map_err(|e| CoreError::Export {
        message: e.to_string(),
    })?;
    debug!(rows = count, "csv export");
    String::from_utf8(bytes).map_err(|e| CoreError::Export {
        message: e.to_string(),
    })
}

/// Pretty-printed JSON of any serializable collection.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CoreError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::{CapTable, EntityId, EquityType, Shareholder};

    fn cap_table() -> CapTable {
        let holders = [
            ("SH-1", "Avery Quinn", 750),
            ("SH-2", "Blake \"BJ\" Ortiz", 250),
        ]
        .map(|(id, name, shares)| Shareholder {
            id: EntityId::from(id),
            name: name.into(),
            email: format!("{}@example.com", id.to_lowercase()),
            shares_held: shares,
            equity_type: EquityType::Common,
            join_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        });
        CapTable::from_shareholders(&holders)
    }

    #[test]
    fn shareholder_header_round_trips() {
        let csv = to_csv(&cap_table().holdings).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let header: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_owned)
            .collect();
        assert_eq!(
            header.join(","),
            "Name,Email,Shares Held,Ownership %,Equity Type,Join Date"
        );
        assert_eq!(reader.records().count(), 2);
    }

    #[test]
    fn every_field_is_quoted() {
        let csv = to_csv(&cap_table().holdings).unwrap();
        insta::assert_snapshot!(csv.trim_end(), @r#"
        "Name","Email","Shares Held","Ownership %","Equity Type","Join Date"
        "Avery Quinn","sh-1@example.com","750","75.00","Common","2024-01-15"
        "Blake ""BJ"" Ortiz","sh-2@example.com","250","25.00","Common","2024-01-15"
        "#);
    }

    #[test]
    fn empty_export_is_just_the_header() {
        let empty: Vec<Holding> = Vec::new();
        let csv = to_csv(&empty).unwrap();
        assert_eq!(
            csv,
            "\"Name\",\"Email\",\"Shares Held\",\"Ownership %\",\"Equity Type\",\"Join Date\"\n"
        );
    }

    #[test]
    fn json_is_pretty() {
        let json = to_json(&cap_table().holdings).unwrap();
        assert!(json.starts_with("[\n  {"));
        let back: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back[0]["ownershipPct"], 75.0);
        assert_eq!(back[1]["sharesHeld"], 250);
    }
}
