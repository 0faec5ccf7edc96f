use criterion::{Criterion, black_box, criterion_group, criterion_main};
use prepvista::panels::library::{
    Category, Difficulty, Question, QuestionFilter, QuestionType, question_bank,
};
use std::time::Duration;

/// The seeded bank repeated until it is catalogue sized.
fn large_bank(copies: usize) -> Vec<Question> {
    let seed = question_bank();
    (0..copies)
        .flat_map(|copy| {
            let offset = (copy * seed.len()) as u32;
            seed.iter().cloned().map(move |mut question| {
                question.id += offset;
                question.bookmarked = copy % 3 == 0;
                question
            })
        })
        .collect()
}

fn bench_library_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("library_filter");
    let bank = large_bank(75);

    let no_filter = QuestionFilter::default();
    group.bench_function("no_filter", |b| {
        b.iter(|| black_box(no_filter.apply(&bank).len()));
    });

    let query = QuestionFilter {
        query: "leadership".to_string(),
        ..Default::default()
    };
    group.bench_function("query_only", |b| {
        b.iter(|| black_box(query.apply(&bank).len()));
    });

    let every_facet = QuestionFilter {
        query: "team".to_string(),
        category: Some(Category::Behavioral),
        difficulty: Some(Difficulty::Medium),
        kind: Some(QuestionType::Situational),
        bookmarked_only: true,
    };
    group.bench_function("every_facet", |b| {
        b.iter(|| black_box(every_facet.apply(&bank).len()));
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .sample_size(100);
    targets = bench_library_filter
}
criterion_main!(benches);
