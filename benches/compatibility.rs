//! Criterion benchmarks for the compatibility checker and regeneration loop.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use buildcheck::services::FirstDifferentPicker;
use buildcheck::{Component, RandomPicker, RegenerationService, check_compatibility};

fn full_build() -> Vec<Component> {
    vec![
        Component::new("CPU", "AMD Ryzen 9 7950X", "16-Core, 4.5GHz, Socket AM5"),
        Component::new("GPU", "NVIDIA RTX 4090", "24GB GDDR6X, PCIe 4.0"),
        Component::new("Motherboard", "ASUS ROG STRIX B650-E", "ATX, AM5, PCIe 5.0, DDR5"),
        Component::new("RAM", "G.Skill Trident Z5 64GB", "DDR5 6000MHz, CAS 28"),
        Component::new("PSU", "Corsair HX1200i", "1200W, 80+ Platinum, Modular"),
        Component::new("Case", "Corsair 5000T RGB", "E-ATX, Tempered Glass, 6x Fans"),
        Component::new("CPU Cooler", "Noctua NH-D15", "Dual Tower, 140mm Fans, Socket AM5"),
        Component::new("Storage", "Samsung 990 Pro 1TB", "NVMe M.2, PCIe 4.0, 7100MB/s"),
    ]
}

fn broken_build() -> Vec<Component> {
    vec![
        Component::new("CPU", "Intel Core i9-13900KS", "24-Core, 6.0GHz, Socket LGA1700"),
        Component::new("Motherboard", "ASUS TUF B550-PLUS", "AM4, DDR4, PCIe 4.0, ATX"),
        Component::new("RAM", "Corsair Vengeance RGB 32GB", "DDR5 6000MHz, Cas 30"),
        Component::new("Case", "Lian Li A4-H2O", "Mini-ITX, Aluminum, Compact"),
    ]
}

fn bench_check(c: &mut Criterion) {
    let build = full_build();
    c.bench_function("check_full_build", |b| {
        b.iter(|| check_compatibility(black_box(&build)))
    });

    let broken = broken_build();
    c.bench_function("check_broken_build", |b| {
        b.iter(|| check_compatibility(black_box(&broken)))
    });
}

fn bench_regenerate(c: &mut Criterion) {
    let service = RegenerationService::default();
    let broken = broken_build();

    c.bench_function("regenerate_first_different", |b| {
        b.iter(|| service.regenerate(black_box(&broken), &mut FirstDifferentPicker))
    });

    c.bench_function("regenerate_seeded_random", |b| {
        b.iter(|| service.regenerate(black_box(&broken), &mut RandomPicker::seeded(42)))
    });
}

criterion_group!(benches, bench_check, bench_regenerate);
criterion_main!(benches);
