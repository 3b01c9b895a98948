use criterion::{criterion_group, criterion_main, Criterion};
use ion_core::atomic_data::AtomicDatabase;
use ion_core::partition::GroundStateModel;
use ion_core::saha::{evaluate_element, ionization_fractions};
use ion_core::scan::temperature_scan;
use ion_types::state::Condition;
use ndarray::Array1;
use std::hint::black_box;

fn bench_fractions_argon(c: &mut Criterion) {
    let db = AtomicDatabase::builtin().expect("embedded atomic data");
    let ar = db.element("Ar").expect("argon present");
    let energies = ar.ionization_energies();
    let ratios = vec![1.0; energies.len()];
    let condition = Condition::from_cgs(10_000.0, 1e15);

    c.bench_function("ionization_fractions_ar_18", |b| {
        b.iter(|| ionization_fractions(black_box(&energies), &ratios, &condition))
    });

    c.bench_function("evaluate_element_ar_ground_state", |b| {
        b.iter(|| evaluate_element(black_box(ar), &condition, &GroundStateModel))
    });
}

fn bench_temperature_scan(c: &mut Criterion) {
    let db = AtomicDatabase::builtin().expect("embedded atomic data");
    let fe = db.element("Fe").expect("iron present");
    let axis = Array1::linspace(3000.0, 15_000.0, 200);

    let mut group = c.benchmark_group("temperature_scan");
    group.sample_size(20);
    group.bench_function("fe_200_points", |b| {
        b.iter(|| temperature_scan(fe, black_box(&axis), 1e21, &GroundStateModel))
    });
    group.finish();
}

criterion_group!(benches, bench_fractions_argon, bench_temperature_scan);
criterion_main!(benches);
