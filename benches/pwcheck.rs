use criterion::{criterion_group, criterion_main, Criterion};
use pwcheck::password_strength;

fn bench_password_strength(c: &mut Criterion) {
    let passwords = [
        "",
        "password",
        "qwER43@!",
        "r0sebudmaelstrom11/20/91aaaa",
        "correct horse battery staple",
        "Tr0ub4dour&3",
    ];

    let mut group = c.benchmark_group("password_strength");
    for password in passwords {
        group.bench_with_input(password, &password, |b, &password| {
            b.iter(|| password_strength(password, &[] as &[&str]));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_password_strength);
criterion_main!(benches);
