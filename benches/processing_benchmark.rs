use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use datamap::processors::{GeometryDeriver, Normalizer};

// Create a CSV with a share of rows missing a coordinate
fn create_test_csv(rows: usize) -> Vec<u8> {
    let mut csv = String::from("ID,Name,Latitude,Longitude,Value\n");
    for i in 0..rows {
        let lat = 50.0 + (i as f64) * 0.001;
        let lon = -2.0 + (i as f64) * 0.002;
        if i % 10 == 0 {
            csv.push_str(&format!("{},site {},{},,{}\n", i, i, lat, i * 3));
        } else {
            csv.push_str(&format!("{},site {},{},{},{}\n", i, i, lat, lon, i * 3));
        }
    }
    csv.into_bytes()
}

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let normalizer = Normalizer::new();

    for rows in [1_000, 10_000, 100_000] {
        let input = create_test_csv(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &input, |b, input| {
            b.iter(|| normalizer.normalize(black_box(input)))
        });
    }

    group.finish();
}

fn benchmark_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive");
    let deriver = GeometryDeriver::new();

    for rows in [1_000, 10_000, 100_000] {
        let normalized = match Normalizer::new().normalize(&create_test_csv(rows)) {
            Ok(normalized) => normalized,
            Err(e) => panic!("benchmark input failed to normalize: {}", e),
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(rows),
            &normalized.table,
            |b, table| b.iter(|| deriver.derive(black_box(table.all()))),
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_normalize, benchmark_derive);
criterion_main!(benches);
