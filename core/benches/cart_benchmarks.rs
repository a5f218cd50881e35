use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;
use std::sync::Arc;
use trolley::{CartDrawer, CartLineItem, CartStore, CartStoreOptions, MemoryStorage, PersistencePolicy, ProductId};

// --- Helpers ---
fn line(id: u64, variant: &str) -> CartLineItem {
  CartLineItem::new(id, format!("Product {}", id), Decimal::new(1999, 2), "/merch/bench.jpg", 1).with_variant(variant)
}

fn store_with(policy: PersistencePolicy) -> CartStore {
  let storage = Arc::new(MemoryStorage::new());
  CartStore::open(storage, CartStoreOptions::default().with_policy(policy))
}

// --- Benchmark Functions ---

/// Repeated stepper clicks: the case deferred persistence exists for.
fn bench_merge_adds(c: &mut Criterion) {
  let mut group = c.benchmark_group("merge_adds");
  for lines in [1u64, 10, 50] {
    group.throughput(Throughput::Elements(lines * 20));
    for policy in [PersistencePolicy::Immediate, PersistencePolicy::Deferred] {
      group.bench_with_input(
        BenchmarkId::new(format!("{:?}", policy), lines),
        &lines,
        |b, &lines| {
          b.iter(|| {
            let mut store = store_with(policy);
            for _ in 0..20 {
              for id in 0..lines {
                store.add_item(line(id, "M"));
              }
            }
            store.flush();
            store.total_item_count()
          })
        },
      );
    }
  }
  group.finish();
}

fn bench_drawer_view(c: &mut Criterion) {
  let mut store = store_with(PersistencePolicy::Deferred);
  for id in 0..50 {
    store.add_item(line(id, "L"));
  }
  store.update_quantity(&ProductId::Numeric(7), Some("L"), 4);
  let drawer = CartDrawer::default();

  c.bench_function("drawer_view_50_lines", |b| b.iter(|| drawer.view(&store.snapshot())));
}

criterion_group!(benches, bench_merge_adds, bench_drawer_view);
criterion_main!(benches);
