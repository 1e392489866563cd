use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use cricket_pulse::config::DashboardConfig;
use cricket_pulse::prefs::MemoryPreferences;
use cricket_pulse::score::parse_score;
use cricket_pulse::simulator::RngSource;
use cricket_pulse::state::AppState;
use cricket_pulse::template::seed_template;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_score_parse(c: &mut Criterion) {
    let samples = ["245/6", " 312/4 ", "180/10", "98/", "N/A", "120"];
    c.bench_function("score_parse", |b| {
        b.iter(|| {
            for raw in samples {
                let _ = black_box(parse_score(black_box(raw)));
            }
        })
    });
}

fn bench_session(c: &mut Criterion) {
    let config = DashboardConfig {
        load_delay: Duration::ZERO,
        update_interval: Duration::from_millis(250),
        ..DashboardConfig::default()
    };
    c.bench_function("ten_minute_session", |b| {
        b.iter(|| {
            let mut state = AppState::new(
                &config,
                Box::new(MemoryPreferences::new()),
                Some(seed_template()),
                Box::new(RngSource(StdRng::seed_from_u64(7))),
            )
            .unwrap();
            let mut now = Duration::ZERO;
            while now < Duration::from_secs(600) {
                state.advance(now);
                now += Duration::from_millis(16);
            }
            black_box(state.container.card_count());
        })
    });
}

criterion_group!(benches, bench_score_parse, bench_session);
criterion_main!(benches);
