use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use markdown_trickle_parser::{Event, EventLog, StreamParser};
use pulldown_cmark::Parser;
mod common;

fn bench_streaming_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming");
    group.sample_size(10);

    let content = common::generate_markdown_content(100);

    for size in [1usize, 4, 19, 256] {
        let chunks = common::chunk_content(&content, size);
        group.bench_with_input(BenchmarkId::new("chunked", size), &chunks, |b, chunks| {
            b.iter(|| {
                let mut parser = StreamParser::new();
                let mut events: Vec<Event> = Vec::new();
                for chunk in chunks {
                    parser
                        .feed(std::hint::black_box(chunk), &mut events)
                        .unwrap();
                }
                parser.finish(&mut events).unwrap();
                std::hint::black_box(events);
            });
        });
    }

    group.bench_function("merged_log", |b| {
        b.iter(|| {
            let mut parser = StreamParser::new();
            let mut log = EventLog::new();
            parser.feed(std::hint::black_box(&content), &mut log).unwrap();
            parser.finish(&mut log).unwrap();
            std::hint::black_box(log);
        });
    });

    group.finish();
}

fn bench_pulldown_cmark_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming");
    group.sample_size(10);

    let content = common::generate_markdown_content(100);
    group.bench_function("pulldown_cmark", |b| {
        b.iter(|| {
            let parser = Parser::new(std::hint::black_box(&content));
            let events: Vec<_> = parser.collect();
            std::hint::black_box(events);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_streaming_parser, bench_pulldown_cmark_baseline);
criterion_main!(benches);
