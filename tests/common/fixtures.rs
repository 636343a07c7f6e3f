#![allow(dead_code)]

use image::{ImageBuffer, Rgb, Rgba};
use serde_json::{Value, json};
use std::io::Cursor;

/// An empty A4 template.
pub fn minimal_template() -> Value {
    json!({
        "pageSize": { "width": 595, "height": 842 },
        "elements": []
    })
}

/// An A4 template with the given elements.
pub fn template_with_elements(elements: Value) -> Value {
    json!({
        "pageSize": { "width": 595, "height": 842 },
        "elements": elements
    })
}

/// A template in the stored-row shape, with the layout under `content`.
pub fn template_row(elements: Value) -> Value {
    json!({
        "id": "tpl-1",
        "name": "Basic",
        "content": {
            "pageSize": { "width": 595, "height": 842 },
            "elements": elements
        }
    })
}

pub fn sample_invoice_json() -> &'static str {
    r#"{
        "invoice_number": "INV-2024-001",
        "amount": 1350.5,
        "currency": "EUR",
        "status": "draft",
        "issue_date": "2024-05-01T00:00:00.000Z",
        "due_date": "2024-05-31T00:00:00.000Z",
        "data": {
            "company_name": "Folio Ltd",
            "company_address": "1 Main Street",
            "company_email": "accounts@folio.test",
            "customer_name": "Acme Co",
            "customer_email": "billing@acme.test",
            "customer_address": "9 Side Road",
            "notes": "Payment due within 30 days",
            "line_items": [
                { "description": "Consulting", "quantity": 10, "unit_price": 120, "total": 1200 },
                { "description": "Travel", "quantity": 1, "unit_price": 150.5, "total": 150.5 }
            ]
        }
    }"#
}

/// A small PNG logo.
pub fn png_logo(width: u32, height: u32) -> Vec<u8> {
    let img: image::DynamicImage = ImageBuffer::from_pixel(width, height, Rgb([20u8, 40, 200])).into();
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

/// A PNG logo whose left column is fully transparent.
pub fn translucent_png_logo(width: u32, height: u32) -> Vec<u8> {
    let img: image::DynamicImage =
        ImageBuffer::from_fn(width, height, |x, _| Rgba([200u8, 30, 30, if x == 0 { 0 } else { 255 }]))
            .into();
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}
