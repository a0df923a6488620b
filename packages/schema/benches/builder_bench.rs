use criterion::{black_box, criterion_group, criterion_main, Criterion};
use drafter_schema::{DocumentBuilder, Fragment, Outline, SectionData, TextRun};

fn outline(sections: usize) -> Outline {
    Outline {
        sections: (0..sections)
            .map(|i| {
                SectionData::new(
                    format!("Section {}", i),
                    (0..4).map(|p| format!("Paragraph {} of section {}.", p, i)).collect(),
                )
            })
            .collect(),
    }
}

fn build_small_document(c: &mut Criterion) {
    let outline = outline(5);

    c.bench_function("build_small_document", |b| {
        b.iter(|| DocumentBuilder::new("bench").build_document(black_box(&outline)))
    });
}

fn build_large_document(c: &mut Criterion) {
    let outline = outline(200);

    c.bench_function("build_large_document", |b| {
        b.iter(|| DocumentBuilder::new("bench").build_document(black_box(&outline)))
    });
}

fn replace_text_in_last_section(c: &mut Criterion) {
    let doc = DocumentBuilder::new("bench").build_document(&outline(200));
    let pos = doc.content_size() - 4;
    let fragment = Fragment::Inline(vec![TextRun::plain("edited")]);

    c.bench_function("replace_text_in_last_section", |b| {
        b.iter(|| doc.replace(black_box(pos), black_box(pos), &fragment))
    });
}

fn resolve_positions(c: &mut Criterion) {
    let doc = DocumentBuilder::new("bench").build_document(&outline(200));
    let size = doc.content_size();

    c.bench_function("resolve_positions", |b| {
        b.iter(|| {
            for pos in (0..size).step_by(97) {
                let _ = black_box(doc.resolve(pos));
            }
        })
    });
}

criterion_group!(
    benches,
    build_small_document,
    build_large_document,
    replace_text_in_last_section,
    resolve_positions
);
criterion_main!(benches);
