//! Criterion benchmarks for proxy_log

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use http::{Method, Request, Response, StatusCode};
use proxy_log::prelude::*;
use std::io::Sink;
use std::time::Duration;

fn sink_handler(level: Level) -> Handler {
    let handler = Handler::with_fallback(level, JsonWriter::new(std::io::sink()));
    handler.add_writer(JsonWriter::<Sink>::new(std::io::sink()));
    handler
}

// ============================================================================
// Handler Creation Benchmarks
// ============================================================================

fn bench_handler_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("handler_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("new", |b| {
        b.iter(|| black_box(Handler::new(Level::Info)));
    });

    group.bench_function("builder", |b| {
        b.iter(|| {
            let handler = Handler::builder()
                .level(Level::Debug)
                .writer(MemoryWriter::new())
                .fallback(MemoryWriter::new())
                .build();
            black_box(handler)
        });
    });

    group.finish();
}

// ============================================================================
// Dispatch Benchmarks
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let handler = sink_handler(Level::Info);

    group.bench_function("info", |b| {
        b.iter(|| handler.info(black_box("upstream selected")));
    });

    group.bench_function("below_threshold", |b| {
        b.iter(|| handler.debug(black_box("cache probe")));
    });

    group.bench_function("formatted", |b| {
        b.iter(|| handler.info(format_args!("forwarded {} bytes", black_box(1420))));
    });

    group.finish();
}

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");

    for count in [1usize, 2, 4, 8] {
        let handler = Handler::with_fallback(Level::Info, MemoryWriter::new());
        for _ in 0..count {
            handler.add_writer(JsonWriter::<Sink>::new(std::io::sink()));
        }

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &handler, |b, handler| {
            b.iter(|| handler.warning(black_box("slow upstream")));
        });
    }

    group.finish();
}

// ============================================================================
// Enrichment Benchmarks
// ============================================================================

fn bench_enrichment(c: &mut Criterion) {
    let mut group = c.benchmark_group("enrichment");
    group.throughput(Throughput::Elements(1));

    let handler = sink_handler(Level::Debug);

    let request = Request::builder()
        .method(Method::GET)
        .uri("http://example.com/search?q=rust")
        .header("user-agent", "bench/1.0")
        .body(())
        .unwrap();
    let response = Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "text/html")
        .header("content-length", "5120")
        .body(())
        .unwrap();
    let questions = vec![DnsQuestion::new("example.com.", RecordType::A)];
    let answer = DnsRecord::A("93.184.216.34".parse().unwrap());

    group.bench_function("fields", |b| {
        b.iter(|| {
            handler
                .with_field("client", black_box("192.0.2.10"))
                .with_field("bytes", black_box(4096))
                .with_field("elapsed", Duration::from_millis(12))
                .info("request proxied")
        });
    });

    group.bench_function("http_request_response", |b| {
        b.iter(|| {
            handler
                .with_request(black_box(&request))
                .with_response(black_box(&response))
                .info("request proxied")
        });
    });

    group.bench_function("dns_answer", |b| {
        b.iter(|| {
            handler
                .with_dns_questions(black_box(&questions))
                .with_dns_answer("example.com.", Duration::from_secs(300), black_box(&answer))
                .debug("resolved")
        });
    });

    group.bench_function("error_chain", |b| {
        let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        b.iter(|| handler.with_error(black_box(&err)).warning("upstream retry"));
    });

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_output_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("output_format");
    group.throughput(Throughput::Elements(1));

    let message = Message::new(Level::Info)
        .with_summary("request proxied")
        .with_field("client", "192.0.2.10")
        .with_field("status", 200)
        .with_field("elapsed", Duration::from_micros(1830));
    let timestamp = TimestampFormat::default();

    for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Logfmt] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", format)),
            &format,
            |b, format| {
                b.iter(|| format.format(black_box(&message), &timestamp));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_handler_creation,
    bench_dispatch,
    bench_fan_out,
    bench_enrichment,
    bench_output_format,
);

criterion_main!(benches);
