//! Benchmarks for PCM packet decode and encode
//!
//! Measures framed-mode decode across record sizes, throughput-mode decode, and
//! re-encoding of decoded packets.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pcmframe::test_utils::{sample_framed_packet, throughput_packet};
use pcmframe::{DataPacket, TimestampSource};
use std::hint::black_box;

fn bench_framed_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("framed_decode");

    for payload_size in [16usize, 63, 256] {
        let buffer = sample_framed_packet(64, payload_size);
        group.throughput(Throughput::Bytes(buffer.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(payload_size), &buffer, |b, buffer| {
            b.iter(|| {
                let mut packet = DataPacket::new(TimestampSource::RelativeTimeCounter)
                    .with_frame_payload_size(payload_size);
                packet.decode(black_box(buffer), false).expect("decode");
                black_box(packet)
            })
        });
    }

    group.finish();
}

fn bench_throughput_decode(c: &mut Criterion) {
    let buffer = throughput_packet(&vec![0xA5; 64 * 1024]);

    let mut group = c.benchmark_group("throughput_decode");
    group.throughput(Throughput::Bytes(buffer.len() as u64));
    group.bench_function("64k_stream", |b| {
        b.iter(|| {
            let mut packet = DataPacket::new(TimestampSource::Precision);
            packet.decode(black_box(&buffer), false).expect("decode");
            black_box(packet)
        })
    });
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let buffer = sample_framed_packet(64, 63);
    let mut packet =
        DataPacket::new(TimestampSource::RelativeTimeCounter).with_frame_payload_size(63);
    packet.decode(&buffer, false).expect("decode");

    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Bytes(buffer.len() as u64));
    group.bench_function("framed_odd_records", |b| {
        b.iter(|| black_box(black_box(&packet).encode().expect("encode")))
    });
    group.finish();
}

criterion_group!(benches, bench_framed_decode, bench_throughput_decode, bench_encode);
criterion_main!(benches);
