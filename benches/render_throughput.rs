use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use folio::{DataRecord, RendererBuilder, standard_invoice_template};
use std::hint::black_box;

fn invoice_record(items: usize) -> DataRecord {
    let mut record = DataRecord::new()
        .with("company_name", "Folio Ltd")
        .with("customer_name", "Acme Co")
        .with("invoice_number", "INV-0001")
        .with("currency", "USD")
        .with("amount", items as f64 * 25.0);
    for i in 0..items {
        record.insert(format!("line_items.{}.description", i), format!("Item {}", i));
        record.insert(format!("line_items.{}.quantity", i), 1.0);
        record.insert(format!("line_items.{}.unit_price", i), 25.0);
        record.insert(format!("line_items.{}.total", i), 25.0);
    }
    record
}

fn bench_single_render(c: &mut Criterion) {
    let renderer = RendererBuilder::new().build().expect("renderer");
    let mut group = c.benchmark_group("single_render");
    for items in [1usize, 10, 20] {
        let template = standard_invoice_template(items);
        let record = invoice_record(items);
        group.bench_with_input(BenchmarkId::from_parameter(items), &items, |b, _| {
            b.iter(|| renderer.render(black_box(&template), black_box(&record)).expect("render"))
        });
    }
    group.finish();
}

fn bench_batch_render(c: &mut Criterion) {
    let renderer = RendererBuilder::new().build().expect("renderer");
    let template = standard_invoice_template(10);
    let mut group = c.benchmark_group("batch_render");
    for batch in [16usize, 128] {
        group.throughput(Throughput::Elements(batch as u64));
        group.bench_with_input(BenchmarkId::from_parameter(batch), &batch, |b, &batch| {
            b.iter(|| {
                let records: Vec<_> = (0..batch).map(|_| invoice_record(10)).collect();
                renderer.render_batch(black_box(&template), records)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_render, bench_batch_render);
criterion_main!(benches);
