use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use chrono::{Duration, Utc};
use usergate_auth::{Hs256TokenCodec, Role, TokenClaims, TokenCodec, token_ttl};

fn bench_issue(c: &mut Criterion) {
    let codec = Hs256TokenCodec::new("bench-secret");
    let claims = TokenClaims::new("user", Role::USER, Utc::now(), token_ttl());

    c.bench_function("token/issue", |b| {
        b.iter(|| codec.issue(black_box(&claims)).unwrap())
    });
}

fn bench_verify(c: &mut Criterion) {
    let codec = Hs256TokenCodec::new("bench-secret");
    let now = Utc::now();
    let mut group = c.benchmark_group("token/verify");

    for subject_len in [8usize, 64, 512] {
        let claims = TokenClaims::new("u".repeat(subject_len), Role::USER, now, token_ttl());
        let token = codec.issue(&claims).unwrap();
        let check_at = now + Duration::seconds(1);

        group.bench_with_input(BenchmarkId::from_parameter(subject_len), &token, |b, token| {
            b.iter(|| codec.verify(black_box(token), check_at).unwrap())
        });
    }

    group.finish();
}

fn bench_reject_tampered(c: &mut Criterion) {
    let codec = Hs256TokenCodec::new("bench-secret");
    let now = Utc::now();
    let token = codec
        .issue(&TokenClaims::new("user", Role::USER, now, token_ttl()))
        .unwrap();
    let forged = format!("{}x", token);

    c.bench_function("token/reject_tampered", |b| {
        b.iter(|| codec.verify(black_box(&forged), now).unwrap_err())
    });
}

criterion_group!(benches, bench_issue, bench_verify, bench_reject_tampered);
criterion_main!(benches);
