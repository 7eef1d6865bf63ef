//! Benchmarks for the body and outline render passes.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use quire_renderer::{MarkdownRenderer, RenderFlags};

/// Generate markdown content with specified structure.
fn generate_markdown(headings: usize, paragraphs_per_section: usize) -> String {
    let mut md = String::with_capacity(headings * 50 + headings * paragraphs_per_section * 200);
    md.push_str("# Document Title\n\n");

    for i in 0..headings {
        md.push_str(&format!("## Section {i}\n\n"));
        for j in 0..paragraphs_per_section {
            md.push_str(&format!(
                "Paragraph {j} in section {i} has **bold**, *italic* and a [link](/p/{j}).\n\n"
            ));
        }
        md.push_str("- [x] done\n- [ ] todo\n\n| a | b |\n|---|--:|\n| 1 | 2 |\n\n");
    }
    md
}

fn bench_body_only(c: &mut Criterion) {
    let markdown = generate_markdown(10, 3);
    let renderer = MarkdownRenderer::new().with_flags(RenderFlags::USE_TASK_LIST);

    c.bench_function("render_body_10_sections", |b| {
        b.iter(|| renderer.render_markdown(&markdown));
    });
}

fn bench_two_pass(c: &mut Criterion) {
    let markdown = generate_markdown(10, 3);
    let renderer = MarkdownRenderer::new()
        .with_flags(RenderFlags::USE_TASK_LIST | RenderFlags::SAFELINK)
        .with_toc(Some(2), None, Some("toc".to_owned()));

    c.bench_function("render_two_pass_10_sections", |b| {
        b.iter(|| renderer.render_markdown(&markdown));
    });
}

fn bench_varying_sizes(c: &mut Criterion) {
    let renderer = MarkdownRenderer::new().with_toc(None, None, None);
    let mut group = c.benchmark_group("two_pass_by_size");

    for sections in [5, 20, 80] {
        let markdown = generate_markdown(sections, 4);
        group.throughput(Throughput::Bytes(markdown.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &markdown, |b, md| {
            b.iter(|| renderer.render_markdown(md));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_body_only, bench_two_pass, bench_varying_sizes);
criterion_main!(benches);
