// Benchmarks for the terms parameter codec.
//
// Covers the full pack path (validation + encoding) and the unpack path
// (wire parse + decode). Both sit on the hot path of order construction,
// so they should stay comfortably sub-microsecond.

use criterion::{criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;

use covenant_client::{
    pack_parameters, unpack_parameters, CollateralizedTermsContractParameters,
};

fn bench_pack(c: &mut Criterion) {
    let params = CollateralizedTermsContractParameters::new(
        8,
        Decimal::from_i128_with_scale(1_212_234_234 * 10i128.pow(18), 0),
        90,
    );

    c.bench_function("codec/pack_parameters", |b| {
        b.iter(|| pack_parameters(&params));
    });
}

fn bench_unpack(c: &mut Criterion) {
    let word = "0x0000000000000000000000000000000000000083eabc9580d20c1abba800005a";

    c.bench_function("codec/unpack_parameters", |b| {
        b.iter(|| unpack_parameters(word));
    });
}

fn bench_wire_render(c: &mut Criterion) {
    let params = CollateralizedTermsContractParameters::new(
        1,
        Decimal::from(10u64.pow(18)),
        30,
    );
    let word = pack_parameters(&params).unwrap();

    c.bench_function("codec/word_to_string", |b| {
        b.iter(|| word.to_string());
    });
}

criterion_group!(benches, bench_pack, bench_unpack, bench_wire_render);
criterion_main!(benches);
