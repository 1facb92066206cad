use criterion::{Criterion, black_box, criterion_group, criterion_main};
use effconf_core::{EffectiveConfig, KeyPrefix, PropertySource, merge, ordinal};

fn sample_sources(keys: usize) -> Vec<PropertySource> {
    let tiers = [
        ("forced", ordinal::FORCED),
        ("system", ordinal::SYSTEM),
        ("environment", ordinal::ENVIRONMENT),
        ("build", ordinal::BUILD),
        ("application.yaml", ordinal::APPLICATION_YAML),
        ("application.properties", ordinal::APPLICATION_PROPERTIES),
    ];
    tiers
        .iter()
        .enumerate()
        .map(|(tier, (name, ordinal))| {
            PropertySource::from_pairs(
                *name,
                *ordinal,
                (0..keys).filter(|i| i % (tier + 1) == 0).flat_map(|i| {
                    [
                        (
                            format!("quarkus.section{}.key{i}", i % 13),
                            format!("{name}-{i}"),
                        ),
                        (
                            format!("%dev.quarkus.section{}.key{i}", i % 13),
                            format!("{name}-dev-{i}"),
                        ),
                    ]
                }),
            )
        })
        .collect()
}

fn merge_benchmark(c: &mut Criterion) {
    let sources = sample_sources(1000);
    c.bench_function("merge (6 sources, dev profile)", |b| {
        b.iter(|| merge(black_box(&sources), black_box("dev")))
    });
}

fn effective_config_benchmark(c: &mut Criterion) {
    let sources = sample_sources(1000);
    let prefix = KeyPrefix::default();
    c.bench_function("EffectiveConfig::from_sources (with origins)", |b| {
        b.iter(|| EffectiveConfig::from_sources(black_box(&sources), "dev", &prefix))
    });
}

criterion_group!(benches, merge_benchmark, effective_config_benchmark);
criterion_main!(benches);
