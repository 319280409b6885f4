use criterion::{Criterion, criterion_group, criterion_main};
use draftmark_engine::{Converter, Document};
use pulldown_cmark::Parser;

fn generate_markdown(sections: usize) -> String {
    let mut md = String::new();
    for i in 0..sections {
        md.push_str(&format!("## Section {i}\n"));
        md.push_str("Some **bold** and *italic* text with `code` and a [link](example.com).\n");
        md.push_str("- first item\n  - nested *item*\n- [x] done\n");
        md.push_str("```rust\nfn main() {}\n```\n\n");
    }
    md
}

fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");
    group.sample_size(10);

    let converter = Converter::default();
    let markdown = generate_markdown(100);
    let parsed = converter.parse_str(&markdown);

    group.bench_function("parse", |b| {
        b.iter(|| {
            let doc = Document::from_markdown_lines(std::hint::black_box(&markdown));
            std::hint::black_box(converter.from_markdown(doc));
        });
    });

    group.bench_function("serialize", |b| {
        b.iter(|| std::hint::black_box(converter.to_markdown(std::hint::black_box(&parsed))));
    });

    group.bench_function("pulldown_cmark_baseline", |b| {
        b.iter(|| {
            let events: Vec<_> = Parser::new(std::hint::black_box(&markdown)).collect();
            std::hint::black_box(events);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_conversion);
criterion_main!(benches);
