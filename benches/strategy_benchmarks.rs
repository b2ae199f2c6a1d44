use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use thermowatch::{Event, NotifyStrategy, Reading, TemperatureUnit, ThresholdStrategy};

/// Benchmark edge detection over a saw-tooth temperature trace
fn bench_should_notify(c: &mut Criterion) {
    let events: Vec<Event> = (0..1000)
        .map(|i| Event::from(format!("{:.1}", 30.0 + (i % 50) as f64 * 0.1)))
        .collect();

    c.bench_function("should_notify_1000_events", |b| {
        b.iter(|| {
            let mut strategy = ThresholdStrategy::celsius(32.5);
            events
                .iter()
                .filter(|event| strategy.should_notify(black_box(event)))
                .count()
        })
    });
}

/// Benchmark payload decoration per output unit
fn bench_decorate(c: &mut Criterion) {
    let event = Event::from("34.6");
    let mut group = c.benchmark_group("decorate");

    for unit in [TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit] {
        let strategy = ThresholdStrategy::new(32.5, unit);
        group.bench_with_input(BenchmarkId::from_parameter(unit), &event, |b, event| {
            b.iter(|| strategy.decorate(black_box(event)).expect("Should decorate"))
        });
    }

    group.finish();
}

/// Benchmark serializing readings into events
fn bench_reading_to_event(c: &mut Criterion) {
    let reading = Reading::new(34.625);

    c.bench_function("reading_to_event", |b| {
        b.iter(|| black_box(&reading).to_event())
    });
}

criterion_group!(benches, bench_should_notify, bench_decorate, bench_reading_to_event);
criterion_main!(benches);
