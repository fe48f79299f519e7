use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use decklayout_core::FrameClock;
use decklayout_ui::{Card, Deck, DeckConfig, SizingMode};

const CARD_COUNT_SAMPLES: &[usize] = &[8, 64, 512];
const DECK_WIDTH: f32 = 1920.0;
const DECK_HEIGHT: f32 = 1080.0;
const FRAME_NANOS: u64 = 16_000_000;

struct DeckFixture {
    clock: FrameClock,
    deck: Deck,
    time_nanos: u64,
}

impl DeckFixture {
    fn new(cards: usize) -> Self {
        let clock = FrameClock::new();
        let config = DeckConfig::default()
            .with_left_most(64.0, 320.0)
            .with_spacing(4.0);
        let deck = Deck::with_config(clock.clone(), config).expect("valid config");
        deck.measure(DECK_WIDTH, DECK_HEIGHT);
        let mut fixture = Self {
            clock,
            deck,
            time_nanos: 0,
        };
        for _ in 0..cards {
            fixture.deck.add_card(Card::new(SizingMode::Default));
            fixture.settle();
        }
        fixture
    }

    fn settle(&mut self) {
        while self.clock.has_frame_callbacks() {
            self.clock.drain_frame_callbacks(self.time_nanos);
            self.time_nanos += FRAME_NANOS;
        }
    }
}

fn bench_drag_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("deck_drag");
    for &cards in CARD_COUNT_SAMPLES {
        group.bench_with_input(BenchmarkId::new("cards", cards), &cards, |b, &cards| {
            let fixture = DeckFixture::new(cards);
            // A spread-out stack followed by pushing it back together.
            b.iter(|| {
                for _ in 0..8 {
                    fixture.deck.drag_by(black_box(-40.0));
                }
                for _ in 0..8 {
                    fixture.deck.drag_by(black_box(40.0));
                }
            });
        });
    }
    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("deck_navigation");
    for &cards in CARD_COUNT_SAMPLES {
        group.bench_with_input(BenchmarkId::new("cards", cards), &cards, |b, &cards| {
            let mut fixture = DeckFixture::new(cards);
            b.iter(|| {
                fixture.deck.drag_by(-300.0);
                fixture.deck.show_previous();
                fixture.settle();
                fixture.deck.drag_by(300.0);
                fixture.deck.show_next();
                fixture.settle();
                black_box(fixture.deck.left_card_position());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("deck_layout");
    for &cards in CARD_COUNT_SAMPLES {
        group.bench_with_input(BenchmarkId::new("cards", cards), &cards, |b, &cards| {
            let fixture = DeckFixture::new(cards);
            b.iter(|| {
                fixture.deck.measure(black_box(DECK_WIDTH), DECK_HEIGHT);
                fixture.deck.layout(true);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_drag_frames, bench_navigation, bench_layout);
criterion_main!(benches);
