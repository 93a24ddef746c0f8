//! Performance benchmarks for fcfg-engine

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fcfg_engine::{changed_fields, reconcile, Device, DeviceKind, FieldSet, TimeWindow};

fn make_device(i: usize, variant: usize) -> Device {
    let mut device = Device::new(format!("d-{}", i), format!("FC{}", i % 97), format!("FG{}", i));
    device.state = "Planned".to_string();
    device.tc_part_no = Some(format!("PN-{}", i));
    device.nom_loc_x = Some(i as f64);
    device.nom_loc_z = Some((i * variant) as f64);
    device.ray_trace = Some((i % 2) as i64);
    if i % 5 == 0 {
        device.kind = DeviceKind::Mirror {
            coating: Some("Pt".to_string()),
            radius_of_curvature: Some(variant as f64),
        };
    }
    device
}

fn bench_comparator(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparator");

    group.bench_function("changed_fields_identical", |b| {
        let a = make_device(5, 1);
        let other = a.clone();
        b.iter(|| changed_fields(black_box(&a), black_box(&other), FieldSet::Primary))
    });

    group.bench_function("changed_fields_updated", |b| {
        let a = make_device(5, 1);
        let other = make_device(5, 2);
        b.iter(|| changed_fields(black_box(&a), black_box(&other), FieldSet::Primary))
    });

    group.finish();
}

fn bench_reconciliation(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconciliation");

    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::new("reconcile", size), size, |b, &size| {
            // A and B overlap by half; every third shared device differs
            let a: Vec<Device> = (0..size).map(|i| make_device(i, 1)).collect();
            let b_side: Vec<Device> = (size / 2..size + size / 2)
                .map(|i| make_device(i, if i % 3 == 0 { 2 } else { 1 }))
                .collect();

            b.iter(|| reconcile(black_box(&a), black_box(&b_side)))
        });

        group.bench_with_input(BenchmarkId::new("self_diff", size), size, |b, &size| {
            let a: Vec<Device> = (0..size).map(|i| make_device(i, 1)).collect();
            b.iter(|| reconcile(black_box(&a), black_box(&a)))
        });
    }

    group.finish();
}

fn bench_window(c: &mut Criterion) {
    let now = NaiveDate::from_ymd_opt(2024, 3, 31)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap_or_default();

    c.bench_function("resolve_last_month", |b| {
        b.iter(|| TimeWindow::LastMonth.resolve(black_box(now)))
    });
}

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");

    group.bench_function("diff_to_json", |b| {
        let a: Vec<Device> = (0..500).map(|i| make_device(i, 1)).collect();
        let other: Vec<Device> = (250..750).map(|i| make_device(i, 2)).collect();
        let diff = reconcile(&a, &other).unwrap_or_default();

        b.iter(|| serde_json::to_string(black_box(&diff)))
    });

    group.bench_function("device_from_json", |b| {
        let json = r#"{"id":"d-1","fc":"AT1L0","fg":"SOLID","state":"Planned","nom_loc_x":"","nom_loc_y":"1.5","ray_trace":1}"#;

        b.iter(|| serde_json::from_str::<Device>(black_box(json)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_comparator,
    bench_reconciliation,
    bench_window,
    bench_serialization,
);
criterion_main!(benches);
