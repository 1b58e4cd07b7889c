use criterion::{Criterion, criterion_group, criterion_main};

use core::hint::black_box;

use transcode8::{convert, Encoding, Endian, ProcessPolicy};

fn latin1_to_utf8(c: &mut Criterion) {
    let size = 100_000_000;
    let unit = "The quick brown fox jumps over the lazy dog, caf\xE9.\n";
    let mut data = Vec::with_capacity(size);
    while data.len() < size {
        data.extend_from_slice(unit.as_bytes());
    }

    let mut out = vec![0u8; data.len() * 2];

    let mut group = c.benchmark_group("latin1_to_utf8");
    group.throughput(criterion::Throughput::BytesDecimal(data.len() as u64));
    group.sample_size(10);

    group.bench_function("convert", |b| {
        b.iter(|| {
            let r = convert(
                Encoding::Latin1,
                Encoding::Utf8,
                ProcessPolicy::DEFAULT,
                black_box(&data),
                &mut out,
                Endian::Little,
                Endian::Little,
            );
            assert!(r.is_ok());
        })
    });

    group.finish();
}

fn utf16_to_utf8(c: &mut Criterion) {
    let size = 100_000_000;
    let unit = "Hello, \u{4e16}\u{754c}! \u{1f600}\n";
    let mut units: Vec<u16> = Vec::new();
    while units.len() * 2 < size {
        units.extend(unit.encode_utf16());
    }
    let mut data = Vec::with_capacity(units.len() * 2);
    for u in &units {
        data.extend_from_slice(&u.to_le_bytes());
    }

    let mut out = vec![0u8; data.len() * 2];

    let mut group = c.benchmark_group("utf16_to_utf8");
    group.throughput(criterion::Throughput::BytesDecimal(data.len() as u64));
    group.sample_size(10);

    group.bench_function("convert", |b| {
        b.iter(|| {
            let r = convert(
                Encoding::Utf16Le,
                Encoding::Utf8,
                ProcessPolicy::DEFAULT,
                black_box(&data),
                &mut out,
                Endian::Little,
                Endian::Little,
            );
            assert!(r.is_ok());
        })
    });

    group.finish();
}

criterion_group!(benches, latin1_to_utf8, utf16_to_utf8);
criterion_main!(benches);
