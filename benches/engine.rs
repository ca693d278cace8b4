//! Benchmarks for hand drawing and return resolution.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use wealth_guardians::{
    CardCatalog, CardEffectResolver, DeckManager, GameRng, MarketCondition, Portfolio,
};

fn benchmark_draw_hand(c: &mut Criterion) {
    let mut catalog = CardCatalog::new();
    let mut deck = DeckManager::new(&mut catalog, GameRng::new(42));

    c.bench_function("draw_hand", |b| {
        b.iter(|| black_box(deck.draw_hand()));
    });
}

/// Return resolution over portfolios of increasing size.
fn benchmark_resolve_returns(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_returns");

    for size in [1usize, 7, 50] {
        let mut catalog = CardCatalog::new();
        let assets = catalog.preset_asset_cards();
        let mut portfolio = Portfolio::new();
        for i in 0..size {
            let card = catalog.create_asset_card(|c| {
                *c = assets[i % assets.len()].clone();
            });
            portfolio.add_asset(&card, 2, 1);
        }
        let mut resolver = CardEffectResolver::new(GameRng::new(7));

        group.bench_with_input(BenchmarkId::new("holdings", size), &size, |b, _| {
            b.iter(|| {
                let mut snapshot = portfolio.clone();
                snapshot.resolve_returns(&mut resolver, black_box(MarketCondition::Volatile));
                black_box(snapshot.total_value())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_draw_hand, benchmark_resolve_returns);
criterion_main!(benches);
