use criterion::{black_box, criterion_group, criterion_main, Criterion};
use morse_game_core::morse::{encode, total_duration_ms, Playback, ToneSink};
use morse_game_core::HalError;

struct NullSink;

impl ToneSink for NullSink {
    fn tone_on(&mut self, _duration_ms: u32) -> Result<(), HalError> {
        Ok(())
    }

    fn tone_off(&mut self) -> Result<(), HalError> {
        Ok(())
    }
}

fn bench_encode(c: &mut Criterion) {
    c.bench_function("encode CAFE", |b| b.iter(|| encode(black_box("CAFE"), black_box(240))));
    c.bench_function("encode 12 chars", |b| {
        b.iter(|| encode(black_box("FABLED HEART"), black_box(100)))
    });
    c.bench_function("encode total duration", |b| {
        let sequence = encode("HEART", 160).unwrap();
        b.iter(|| total_duration_ms(black_box(&sequence)))
    });
}

fn bench_playback(c: &mut Criterion) {
    c.bench_function("playback at 50 Hz", |b| {
        let sequence = encode("FABLED", 100).unwrap();
        b.iter(|| {
            let mut playback = Playback::new(sequence.clone());
            let mut sink = NullSink;
            playback.start(&mut sink).unwrap();
            while !playback.is_finished() {
                playback.advance(black_box(20), &mut sink).unwrap();
            }
        })
    });
}

criterion_group!(benches, bench_encode, bench_playback);
criterion_main!(benches);
