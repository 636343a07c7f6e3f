//! The built-in invoice layout and the invoice record it is filled from.

use crate::error::PipelineError;
use chrono::{DateTime, NaiveDate};
use folio_template::{DataRecord, Element, Frame, Template};
use folio_types::{Color, Size};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value, json};

const MARGIN: f32 = 50.0;
const COL_DESCRIPTION: f32 = 50.0;
const COL_QTY: f32 = 300.0;
const COL_UNIT_PRICE: f32 = 400.0;
const COL_TOTAL: f32 = 500.0;
const RULE_END: f32 = 550.0;
const TABLE_TOP: f32 = 290.0;
const ROW_HEIGHT: f32 = 25.0;
/// Offset of money amounts from the `$` that precedes them in item rows.
const DOLLAR_WIDTH: f32 = 7.0;

const REGULAR: &str = "Helvetica";
const BOLD: &str = "Helvetica-Bold";

/// Element ids of the notes block, dropped when an invoice has no notes.
const NOTES_IDS: [&str; 2] = ["notes_label", "notes"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Viewed,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Viewed => "viewed",
            InvoiceStatus::Paid => "paid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvoiceData {
    pub company_name: String,
    #[serde(default)]
    pub company_address: String,
    #[serde(default)]
    pub company_email: Option<String>,
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_address: String,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Any further keys, available to custom templates.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Invoice {
    pub invoice_number: String,
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(deserialize_with = "date_or_timestamp")]
    pub issue_date: NaiveDate,
    #[serde(deserialize_with = "date_or_timestamp")]
    pub due_date: NaiveDate,
    pub data: InvoiceData,
}

impl Invoice {
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn has_notes(&self) -> bool {
        self.data.notes.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    /// Flattens the invoice into the record the standard template binds to.
    ///
    /// Invoice-level keys and `data` keys share one namespace; line items
    /// appear as `line_items.{i}.{field}`. Keys in `data.extra` never
    /// override the named fields.
    pub fn to_record(&self) -> Result<DataRecord, PipelineError> {
        let mut root = self.data.extra.clone();
        let line_items: Vec<Value> = self
            .data
            .line_items
            .iter()
            .map(|item| {
                json!({
                    "description": item.description,
                    "quantity": item.quantity,
                    "unit_price": item.unit_price,
                    "total": item.total,
                })
            })
            .collect();
        let named = json!({
            "invoice_number": self.invoice_number,
            "amount": self.amount,
            "currency": self.currency,
            "status": self.status.as_str(),
            "issue_date": self.issue_date.format("%Y-%m-%d").to_string(),
            "due_date": self.due_date.format("%Y-%m-%d").to_string(),
            "company_name": self.data.company_name,
            "company_address": self.data.company_address,
            "company_email": self.data.company_email,
            "customer_name": self.data.customer_name,
            "customer_email": self.data.customer_email,
            "customer_address": self.data.customer_address,
            "notes": self.data.notes,
            "line_items": line_items,
        });
        if let Value::Object(named) = named {
            root.extend(named);
        }
        Ok(DataRecord::from_json(&Value::Object(root))?)
    }

    /// The standard layout sized for this invoice's line items, without the
    /// notes block when there are no notes.
    pub fn standard_template(&self) -> Template {
        let mut template = standard_invoice_template(self.data.line_items.len());
        if !self.has_notes() {
            template
                .elements
                .retain(|e| !e.frame().id.as_deref().is_some_and(|id| NOTES_IDS.contains(&id)));
        }
        template
    }
}

fn date_or_timestamp<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&s) {
        return Ok(ts.date_naive());
    }
    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .map_err(|e| serde::de::Error::custom(format!("invalid date '{}': {}", s, e)))
}

fn text(x: f32, y: f32, literal: &str, font: &str, size: f32) -> Element {
    Element::text(Frame::new(x, y, 0.0, 0.0), literal).with_font(font, size)
}

fn field(x: f32, y: f32, key: &str, font: &str, size: f32) -> Element {
    Element::field(Frame::new(x, y, 0.0, 0.0), format!("{{{}}}", key), "").with_font(font, size)
}

/// The fixed A4 invoice layout as absolute elements.
///
/// Company header top-left, INVOICE block top-right, BILL TO below it, then
/// a four-column table with one row per line item (money columns prefixed
/// with `$`), a rule, the total and the notes block. Text `y` values are baselines.
pub fn standard_invoice_template(line_item_count: usize) -> Template {
    let mut t = Template::new(Size::A4)
        .with_id("standard-invoice")
        .with_element(field(MARGIN, 74.0, "company_name", BOLD, 24.0))
        .with_element(field(MARGIN, 92.0, "company_address", REGULAR, 10.0))
        .with_element(field(MARGIN, 106.0, "company_email", REGULAR, 10.0))
        .with_element(text(465.0, 140.0, "INVOICE", BOLD, 20.0))
        .with_element(text(400.0, 158.0, "Invoice #:", REGULAR, 10.0))
        .with_element(field(465.0, 158.0, "invoice_number", REGULAR, 10.0))
        .with_element(text(400.0, 172.0, "Date:", REGULAR, 10.0))
        .with_element(field(465.0, 172.0, "issue_date", REGULAR, 10.0))
        .with_element(text(400.0, 186.0, "Due Date:", REGULAR, 10.0))
        .with_element(field(465.0, 186.0, "due_date", REGULAR, 10.0))
        .with_element(text(MARGIN, 220.0, "BILL TO:", BOLD, 12.0))
        .with_element(field(MARGIN + 20.0, 236.0, "customer_name", REGULAR, 10.0))
        .with_element(field(MARGIN + 20.0, 250.0, "customer_email", REGULAR, 10.0))
        .with_element(field(MARGIN + 20.0, 264.0, "customer_address", REGULAR, 10.0));

    let header = TABLE_TOP + 10.0;
    for (x, label) in [
        (COL_DESCRIPTION, "Description"),
        (COL_QTY, "Qty"),
        (COL_UNIT_PRICE, "Unit Price"),
        (COL_TOTAL, "Total"),
    ] {
        t = t.with_element(text(x, header, label, BOLD, 10.0));
    }

    for i in 0..line_item_count {
        let y = header + ROW_HEIGHT * (i as f32 + 1.0);
        for (x, column) in [(COL_DESCRIPTION, "description"), (COL_QTY, "quantity")] {
            t = t.with_element(field(x, y, &format!("line_items.{}.{}", i, column), REGULAR, 10.0));
        }
        for (x, column) in [(COL_UNIT_PRICE, "unit_price"), (COL_TOTAL, "total")] {
            t = t
                .with_element(text(x, y, "$", REGULAR, 10.0))
                .with_element(field(
                    x + DOLLAR_WIDTH,
                    y,
                    &format!("line_items.{}.{}", i, column),
                    REGULAR,
                    10.0,
                ));
        }
    }

    let rule_y = TABLE_TOP + ROW_HEIGHT * (line_item_count as f32 + 1.0);
    let total_y = rule_y + 22.0;
    let notes_y = total_y + 38.0;
    t.with_element(Element::line(
        Frame::new(COL_DESCRIPTION, rule_y, RULE_END - COL_DESCRIPTION, 0.0),
        Some(Color::BLACK),
    ))
    .with_element(text(COL_TOTAL - 80.0, total_y, "Total:", BOLD, 12.0))
    .with_element(field(COL_TOTAL - 40.0, total_y, "currency", BOLD, 12.0))
    .with_element(field(COL_TOTAL, total_y, "amount", BOLD, 12.0))
    .with_element(
        Element::text(Frame::new(MARGIN, notes_y, 0.0, 0.0).with_id(NOTES_IDS[0]), "Notes:")
            .with_font(REGULAR, 10.0),
    )
    .with_element(
        Element::field(Frame::new(MARGIN, notes_y + 14.0, 0.0, 0.0).with_id(NOTES_IDS[1]), "{notes}", "")
            .with_font(REGULAR, 9.0),
    )
}
