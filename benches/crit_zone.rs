extern crate civiltime;
extern crate criterion;
use civiltime::{CalendarRecord, NaturalFields, OpMode, SystemTag, Zone};
use civiltime::zone::drivers;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("UTC complex-add across a leap second", |b| {
        let utc = Zone::Utc;
        let src = CalendarRecord::new(1978, 11, 31, 23, 59, 0, 0, SystemTag::Utc);
        let delta = NaturalFields {
            second: 61,
            ..Default::default()
        };
        b.iter(|| utc.op(black_box(&src), delta, OpMode::ComplexAdd, false))
    });

    c.bench_function("raise TAI to UTC", |b| {
        let tai = CalendarRecord::new(2000, 5, 15, 12, 0, 0, 0, SystemTag::Tai);
        b.iter(|| drivers::raise(black_box(&Zone::Utc), black_box(&tai)))
    });

    c.bench_function("lower UTC to TAI", |b| {
        let utc = CalendarRecord::new(2000, 5, 15, 12, 0, 0, 0, SystemTag::Utc);
        b.iter(|| drivers::lower(black_box(&Zone::Utc), black_box(&utc)))
    });

    c.bench_function("summer-time offset lookup", |b| {
        let utc = CalendarRecord::new(2010, 6, 15, 12, 0, 0, 0, SystemTag::Utc);
        b.iter(|| Zone::Summer.offset(black_box(&utc)))
    });

    c.bench_function("rebased zone construction", |b| {
        let human = CalendarRecord::new(2000, 0, 1, 10, 0, 0, 0, SystemTag::Utc);
        let machine = CalendarRecord::new(2000, 0, 1, 9, 45, 57, 0, SystemTag::Utc);
        b.iter(|| drivers::rebased_from_tai(black_box(&Zone::Utc), black_box(&human), black_box(&machine)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
