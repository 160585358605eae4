use criterion::{criterion_group, criterion_main, Criterion};
use suppsearch::{ReferenceItem, SearchIndex};

fn setup_index() -> SearchIndex<ReferenceItem> {
    let bases = [
        "Vitamin", "Magnesium", "Zinc", "Calcium", "Omega", "Creatine", "Collagen", "Ashwagandha",
        "Melatonin", "Probiotic", "Iron", "Potassium", "Selenium", "Biotin", "Folate", "Niacin",
    ];
    let variants = [
        "A", "B1", "B2", "B6", "B12", "C", "D2", "D3", "E", "K2", "Citrate", "Glycinate",
        "Picolinate", "Complex", "Extract", "Oil", "Powder", "Chelate", "Monohydrate", "Gummies",
    ];

    let mut index = SearchIndex::new();
    for base in bases {
        for variant in variants {
            index.insert(
                &format!("{base} {variant}"),
                ReferenceItem::new(format!("{base} {variant}")),
            );
        }
    }
    index
}

fn bench_search(c: &mut Criterion) {
    let index = setup_index();

    let queries = vec![
        ("short_prefix", "vit"),
        ("exact_prefix", "vitamin d"),
        ("deep_prefix", "magnesium gly"),
        ("fuzzy_typo", "vitamn d3"),
        ("fuzzy_no_prefix", "magnsium"),
        ("corrected_misspelling", "vitamiin c"),
        ("miss", "xylophone"),
    ];

    let mut group = c.benchmark_group("search");
    group.sample_size(50);

    for (name, query) in queries {
        group.bench_function(name, |b| {
            b.iter(|| index.search(query, 4));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
