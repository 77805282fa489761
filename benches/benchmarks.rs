//! Benchmarks for the pagination core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use openwriter::{paginate, Block, Document, Measure, PagedView, TextMeasurer};

fn sample_document(paragraphs: usize) -> String {
    let mut html = String::new();
    for i in 0..paragraphs {
        if i % 10 == 0 {
            html.push_str(&format!("<h2>Section {}</h2>", i / 10));
        }
        html.push_str(&format!(
            "<p>Paragraph {} contains enough text to span multiple lines and test the line breaking algorithm.</p>",
            i
        ));
        if i % 25 == 24 {
            html.push_str(r#"<div class="page-break"></div>"#);
        }
    }
    html
}

fn bench_split_document(c: &mut Criterion) {
    let html = sample_document(200);
    c.bench_function("split_document", |b| {
        b.iter(|| black_box(Document::from_html(black_box(&html))));
    });
}

fn bench_measure_paragraph(c: &mut Criterion) {
    let mut measurer = TextMeasurer::default();
    let markup = format!("<p>{}</p>", "The quick brown fox jumps over the lazy dog. ".repeat(20));
    c.bench_function("measure_paragraph", |b| {
        b.iter(|| black_box(measurer.measure(black_box(&markup))));
    });
}

fn bench_paginate_fixed_heights(c: &mut Criterion) {
    let blocks: Vec<Block> = (0..10_000)
        .map(|i| Block::paragraph(format!("<p>{i}</p>")))
        .collect();
    c.bench_function("paginate_fixed_heights", |b| {
        b.iter(|| black_box(paginate(&blocks, 864.0, &mut |_: &str| 40.0)));
    });
}

fn bench_full_pass_small(c: &mut Criterion) {
    let html = sample_document(10);
    c.bench_function("full_pass_small_document", |b| {
        let mut view = PagedView::new();
        b.iter(|| {
            view.content_changed(black_box(html.as_str()));
            view.on_frame();
        });
    });
}

fn bench_full_pass_medium(c: &mut Criterion) {
    let html = sample_document(200);
    c.bench_function("full_pass_medium_document", |b| {
        let mut view = PagedView::new();
        b.iter(|| {
            view.paginate_now(black_box(&html));
        });
    });
}

fn bench_render_pages(c: &mut Criterion) {
    let mut view = PagedView::new();
    view.paginate_now(&sample_document(200));
    c.bench_function("render_pages", |b| {
        b.iter(|| black_box(view.render()));
    });
}

criterion_group!(
    benches,
    bench_split_document,
    bench_measure_paragraph,
    bench_paginate_fixed_heights,
    bench_full_pass_small,
    bench_full_pass_medium,
    bench_render_pages,
);

criterion_main!(benches);
