use codspeed_criterion_compat::{black_box, criterion_group, criterion_main, Criterion};
use padbind_db::MappingDb;

fn bench_parse_db(c: &mut Criterion) {
    // A representative slice of the community database
    let input: &str = include_str!("gamecontrollerdb.sample.txt");

    c.bench_function("db_parse_community_sample", |b| {
        b.iter(|| {
            let input = black_box(input);
            let db = MappingDb::parse(input);
            black_box(db);
        })
    });
}

criterion_group!(benches, bench_parse_db);
criterion_main!(benches);
