use criterion::{black_box, criterion_group, criterion_main, Criterion};
use knx_values::{default_table, Payload};

fn benchmark_signed16_transcode(c: &mut Criterion) {
    let table = default_table();
    let percent = table.resolve("percentV16").unwrap();

    c.bench_function("signed16_encode", |b| {
        b.iter(|| {
            let payload = percent.to_knx(black_box(123.45)).unwrap();
            black_box(payload)
        })
    });

    let payload = Payload::array([0x30, 0x39]);
    c.bench_function("signed16_decode", |b| {
        b.iter(|| percent.from_knx(black_box(&payload)).unwrap())
    });

    c.bench_function("registry_resolve", |b| {
        b.iter(|| table.resolve(black_box("rotation_angle")).unwrap())
    });
}

criterion_group!(benches, benchmark_signed16_transcode);
criterion_main!(benches);
