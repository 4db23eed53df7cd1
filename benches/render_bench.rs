use criterion::{criterion_group, criterion_main, Criterion};

use certgen::{CertificateRecord, FixedSerial, Renderer};

fn record() -> CertificateRecord {
    CertificateRecord::new("Alexandria Montgomery-Whitfield", "Cloud Computing Fundamentals")
        .with_instructor("Dr. Smith")
        .with_date("2024-01-15")
}

fn bench_render(c: &mut Criterion) {
    let renderer = Renderer::with_serial(1.0, Box::new(FixedSerial(1)));
    let record = record();

    c.bench_function("render_1x", |b| {
        b.iter(|| {
            let _ = renderer.render(&record).unwrap();
        })
    });
}

fn bench_encode_png(c: &mut Criterion) {
    let renderer = Renderer::with_serial(1.0, Box::new(FixedSerial(1)));
    let image = renderer.render(&record()).expect("render failed");

    c.bench_function("encode_png_1x", |b| {
        b.iter(|| {
            let _ = image.encode_png().unwrap();
        })
    });
}

criterion_group!(benches, bench_render, bench_encode_png);
criterion_main!(benches);
