use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;

pub fn parse_throughput_bench(c: &mut Criterion) {
    let mut rng = rand::prelude::StdRng::seed_from_u64(43);
    let input = performance::generate_random_math(&mut rng, 1000 * 1000, 4, &Default::default());
    let tokens = texmath::token::tokenize(&input);
    let commands = texmath::command::Map::default();

    let mut group = c.benchmark_group("parse-throughput");
    group.bench_function("parse_tokens", |b| {
        b.iter(|| texmath::parse::Parser::new(&commands, Default::default()).parse(&tokens))
    });
    group.bench_function("end_to_end", |b| b.iter(|| texmath::parse(&input)));
}

criterion_group!(benches, parse_throughput_bench);
criterion_main!(benches);
