use availability_engine::{merge_insert, overlap_summary, AvailabilitySet, Day, TimePoint};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// A week with `blocks` one-hour blocks per day, offset by `shift` minutes.
fn week(blocks: u16, shift: u16) -> AvailabilitySet {
    let mut set = AvailabilitySet::new();
    for day in Day::ALL {
        for b in 0..blocks {
            let start = (b * 90 + shift) % 1380;
            let end = start + 60;
            set = merge_insert(
                &set,
                day,
                TimePoint::new(start).unwrap(),
                TimePoint::new(end).unwrap(),
            )
            .unwrap();
        }
    }
    set
}

fn bench_overlap_summary(c: &mut Criterion) {
    let mine = week(10, 0);
    let classmates: Vec<(usize, AvailabilitySet)> = (0..200)
        .map(|i| (i, week(8, (i as u16 * 7) % 90)))
        .collect();

    c.bench_function("overlap_summary_200_classmates", |b| {
        b.iter(|| {
            overlap_summary(
                black_box(&mine),
                classmates.iter().map(|(id, set)| (*id, set)),
            )
        })
    });
}

fn bench_merge_insert(c: &mut Criterion) {
    c.bench_function("merge_insert_week_of_blocks", |b| b.iter(|| week(black_box(12), 5)));
}

criterion_group!(benches, bench_overlap_summary, bench_merge_insert);
criterion_main!(benches);
