use std::{hint::black_box, sync::Arc};

use criterion::{Criterion, criterion_group, criterion_main};

use nutriscan::prelude::*;

fn catalogs() -> (Arc<SafetyCatalog>, Arc<NutrientStandards>) {
  let entries = (0..500)
    .map(|index| CatalogEntry::new(&format!("Ingredient Number {index}"), SafetyTier::Caution, "synthetic"))
    .collect::<Vec<_>>();

  let standards = NutrientStandards::from_entries(vec![
    ThresholdEntry::new("sugar_g", 2.0, 10.0, "per 100g"),
    ThresholdEntry::new("sodium_mg", 100.0, 500.0, "per 100g"),
  ])
  .unwrap();

  (Arc::new(SafetyCatalog::from_entries(entries).unwrap()), Arc::new(standards))
}

fn analyze(c: &mut Criterion) {
  let (catalog, standards) = catalogs();
  let scanner = NutriScan::new(catalog, standards);

  let record = ProductRecord::builder("Synthetic Product")
    .ingredients(&["ingredient number 42", "ingredint number 267", "something else entirely"])
    .nutrition(&[("sugar_g", 5.0.into()), ("sodium_mg", 700.0.into())])
    .build();

  c.bench_function("analyze", |b| b.iter(|| black_box(scanner.analyze(&record, &MatchParams::default()))));
}

criterion_group!(benches, analyze);
criterion_main!(benches);
