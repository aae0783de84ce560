//! Criterion benchmarks for the matrix protocol layer.
//!
//! Covers everything between a caller's indices and the bytes on the wire,
//! without a socket.
//!
//! Run with:
//! ```bash
//! cargo bench --bench protocol_benches
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hdmi_matrix::{Addressing, IndexMode, OutputsReply, RouteAck, RouteCommand};

fn bench_encode(c: &mut Criterion) {
    let addressing = Addressing::new(IndexMode::OneBased);

    c.bench_function("route_command_from_integers", |b| {
        b.iter(|| {
            let route = addressing
                .validate_and_convert(black_box(4), black_box(8))
                .unwrap();
            black_box(RouteCommand::new(route).to_bytes())
        })
    });

    c.bench_function("route_command_from_strings", |b| {
        b.iter(|| {
            let route = addressing
                .validate_and_convert(black_box("4"), black_box(" 8 "))
                .unwrap();
            black_box(RouteCommand::new(route).to_bytes())
        })
    });
}

fn bench_decode(c: &mut Criterion) {
    let route = Addressing::new(IndexMode::ZeroBased)
        .validate_and_convert(1, 2)
        .unwrap();

    c.bench_function("route_ack", |b| {
        b.iter(|| {
            let ack = RouteAck::from_bytes(black_box(b"a31\0\0\0\r\n")).unwrap();
            black_box(ack.confirms(route))
        })
    });

    c.bench_function("outputs_reply", |b| {
        b.iter(|| OutputsReply::from_bytes(black_box(b"0s1s2s3s0s1s2s3\r\n")).unwrap())
    });
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
