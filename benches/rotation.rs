use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use microgames::core::{Cue, EventChannel, Orchestrator, Presenter, RotationConfig, TimerQueue};
use microgames::games::default_games;
use microgames::term::{FrameBuffer, StageView, TermPresenter, Viewport};

struct Quiet;

impl Presenter for Quiet {
    fn reset_view(&mut self) {}
    fn play_cue(&mut self, _cue: Cue) {}
    fn show_prompt(&mut self, _prompt: &str) {}
    fn speak(&mut self, _text: &str) {}
}

fn bench_tick(c: &mut Criterion) {
    let mut rotation =
        match Orchestrator::start_rotation(default_games(), RotationConfig::default(), Quiet) {
            Ok(r) => r,
            Err(err) => panic!("{err}"),
        };
    rotation.press().unwrap();

    c.bench_function("rotation_tick_16ms_held", |b| {
        b.iter(|| {
            rotation.tick(black_box(Duration::from_millis(16))).unwrap();
        })
    });
}

fn bench_channel_trigger(c: &mut Criterion) {
    let channel = EventChannel::new();
    let mut subs = Vec::new();
    for _ in 0..16 {
        subs.push(channel.add(|| {}));
    }

    c.bench_function("channel_trigger_16", |b| {
        b.iter(|| black_box(channel.trigger()))
    });
}

fn bench_timer_churn(c: &mut Criterion) {
    c.bench_function("timer_schedule_and_fire_32", |b| {
        b.iter(|| {
            let timers = TimerQueue::new();
            for i in 0..32u64 {
                timers.after(Duration::from_millis(i * 10), || {});
            }
            black_box(timers.advance(Duration::from_secs(1)))
        })
    });
}

fn bench_stage_render(c: &mut Criterion) {
    let rotation =
        match Orchestrator::start_rotation(default_games(), RotationConfig::default(), TermPresenter::new()) {
            Ok(r) => r,
            Err(err) => panic!("{err}"),
        };
    let view = StageView::default();
    let mut fb = FrameBuffer::new(120, 40);

    c.bench_function("stage_render_into_120x40", |b| {
        b.iter(|| {
            view.render_into(&rotation, black_box(Viewport::new(120, 40)), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_channel_trigger,
    bench_timer_churn,
    bench_stage_render
);
criterion_main!(benches);
