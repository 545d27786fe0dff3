//! Benchmarks comparing SimpleDoc compilation vs pulldown-cmark (Markdown)
//!
//! Run with: cargo bench -p simpledoc-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pulldown_cmark::{html, Options, Parser as MdParser};
use simpledoc_core::{Compiler, Level};

/// Sample SimpleDoc content
const SIMPLEDOC_SAMPLE: &str = r#"# Introduction

This is a paragraph with *emphasis*, **strong text**, and a [link](https://example.com).
It demonstrates the basic capabilities of the format.

## Lists

- First item with some content
- Second item with more content
- Third item concluding the list

1. Step one of the process
2. Step two continues
3. Step three completes

## Code Example

```fn answer() -> u32 { 42 }```

## Media

![Architecture diagram](/img/arch.png) shows how the stages connect.

### Notes

Escaping matters: 1 < 2 && "quotes" stay 'safe'.

End of document.
"#;

/// Equivalent Markdown content
const MARKDOWN_SAMPLE: &str = r#"# Introduction

This is a paragraph with *emphasis*, **strong text**, and a [link](https://example.com).
It demonstrates the basic capabilities of the format.

## Lists

- First item with some content
- Second item with more content
- Third item concluding the list

1. Step one of the process
2. Step two continues
3. Step three completes

## Code Example

`fn answer() -> u32 { 42 }`

## Media

![Architecture diagram](/img/arch.png) shows how the stages connect.

### Notes

Escaping matters: 1 < 2 && "quotes" stay 'safe'.

End of document.
"#;

fn render_markdown(input: &str) -> String {
    let parser = MdParser::new_ext(input, Options::empty());
    let mut out = String::with_capacity(input.len() * 2);
    html::push_html(&mut out, parser);
    out
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    let compiler = Compiler::new(Level::Advanced);

    group.throughput(Throughput::Bytes(SIMPLEDOC_SAMPLE.len() as u64));

    group.bench_function("simpledoc", |b| {
        b.iter(|| {
            let html = compiler.compile(black_box(SIMPLEDOC_SAMPLE)).unwrap();
            black_box(html.len())
        })
    });

    group.throughput(Throughput::Bytes(MARKDOWN_SAMPLE.len() as u64));

    group.bench_function("markdown_pulldown", |b| {
        b.iter(|| black_box(render_markdown(black_box(MARKDOWN_SAMPLE)).len()))
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");
    let compiler = Compiler::new(Level::Advanced);

    for size in [1, 5, 10, 20].iter() {
        let simpledoc_content: String = SIMPLEDOC_SAMPLE.repeat(*size);
        let markdown_content: String = MARKDOWN_SAMPLE.repeat(*size);

        group.throughput(Throughput::Bytes(simpledoc_content.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("simpledoc", size),
            &simpledoc_content,
            |b, content| {
                b.iter(|| {
                    let html = compiler.compile(black_box(content)).unwrap();
                    black_box(html.len())
                })
            },
        );

        group.throughput(Throughput::Bytes(markdown_content.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("markdown", size),
            &markdown_content,
            |b, content| b.iter(|| black_box(render_markdown(black_box(content)).len())),
        );
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let compiler = Compiler::new(Level::Advanced);
    let tokens = compiler.tokenize(SIMPLEDOC_SAMPLE);
    let document = compiler.parse(&tokens).unwrap();

    group.bench_function("tokenize", |b| {
        b.iter(|| black_box(compiler.tokenize(black_box(SIMPLEDOC_SAMPLE)).len()))
    });

    group.bench_function("parse", |b| {
        b.iter(|| black_box(compiler.parse(black_box(&tokens)).unwrap().children.len()))
    });

    group.bench_function("validate", |b| {
        b.iter(|| compiler.validate(black_box(&document)).unwrap())
    });

    group.bench_function("generate", |b| {
        b.iter(|| black_box(compiler.generate(black_box(&document)).len()))
    });

    group.finish();
}

criterion_group!(benches, bench_compile, bench_scaling, bench_stages);
criterion_main!(benches);
