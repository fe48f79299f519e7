use anyhow::{bail, Context, Result};
use decklayout_core::FrameClock;
use decklayout_foundation::PointerEvent;
use decklayout_ui::{Card, Deck, DeckConfig, DeckListener, EdgeInsets, SidePanel, Size, SizingMode};

const FRAME_NANOS: u64 = 16_000_000;
const SWIPE_STEPS: usize = 12;

struct LoggingListener;

impl DeckListener for LoggingListener {
    fn on_layout(&self, deck: &Deck) {
        log::info!("layout: {} cards", deck.card_count());
    }

    fn on_remove_drag(&self, _deck: &Deck, first_card: &Card) {
        log::trace!("drag frame, first card at {}", first_card.offset());
    }

    fn on_remove_drag_end(&self, _deck: &Deck) {
        log::info!("drag released");
    }
}

/// A deck driven by simulated frames and scripted pointer input.
struct Session {
    clock: FrameClock,
    deck: Deck,
    time_nanos: u64,
}

impl Session {
    fn new(width: f32, height: f32) -> Result<Self> {
        let clock = FrameClock::new();
        let config = DeckConfig::default()
            .with_left_most(48.0, 240.0)
            .with_spacing(8.0);
        let deck = Deck::with_config(clock.clone(), config).context("deck configuration")?;
        deck.set_listener(LoggingListener);
        deck.measure(width, height);
        deck.layout(true);
        Ok(Self {
            clock,
            deck,
            time_nanos: 0,
        })
    }

    fn frame(&mut self) {
        self.clock.drain_frame_callbacks(self.time_nanos);
        self.time_nanos += FRAME_NANOS;
    }

    fn settle(&mut self) -> usize {
        let mut frames = 0;
        while self.clock.has_frame_callbacks() {
            self.frame();
            frames += 1;
        }
        frames
    }

    fn send(&self, event: PointerEvent) {
        let event = event.at_time((self.time_nanos / 1_000_000) as i64);
        self.deck.on_pointer_event(&event);
    }

    fn swipe(&mut self, from_x: f32, to_x: f32) {
        let y = self.deck.size().height / 2.0;
        self.send(PointerEvent::down(from_x, y));
        for step in 1..=SWIPE_STEPS {
            self.frame();
            let t = step as f32 / SWIPE_STEPS as f32;
            self.send(PointerEvent::moved(from_x + (to_x - from_x) * t, y));
        }
        self.frame();
        self.send(PointerEvent::up(to_x, y));
        let frames = self.settle();
        log::debug!("swipe {from_x} -> {to_x} settled after {frames} frames");
    }

    fn report(&self, label: &str) {
        let positions: Vec<String> = self
            .deck
            .cards()
            .iter()
            .map(|card| {
                let marker = if card.is_visible() { "" } else { " (hidden)" };
                format!("{:.1}{marker}", card.left())
            })
            .collect();
        log::info!(
            "{label}: [{}], back-most visible card {:?}",
            positions.join(", "),
            self.deck.left_card_position()
        );
    }
}

fn parse_size() -> Result<(f32, f32)> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => Ok((1280.0, 800.0)),
        [width, height] => {
            let width: f32 = width.parse().with_context(|| format!("invalid width {width:?}"))?;
            let height: f32 = height
                .parse()
                .with_context(|| format!("invalid height {height:?}"))?;
            if width <= 0.0 || height <= 0.0 {
                bail!("deck size must be positive, got {width}x{height}");
            }
            Ok((width, height))
        }
        _ => bail!("usage: deck-demo [WIDTH HEIGHT]"),
    }
}

#[cfg(feature = "logging")]
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

#[cfg(not(feature = "logging"))]
fn init_logging() {}

fn main() -> Result<()> {
    init_logging();
    let (width, height) = parse_size()?;
    let mut session = Session::new(width, height)?;
    session
        .deck
        .set_side_panel(SidePanel::new("navigation", Size::new(240.0, height)));

    for index in 0..4 {
        let card = if index == 3 {
            Card::fill()
        } else {
            Card::new(SizingMode::Default)
        };
        session.deck.add_card(card.with_padding(EdgeInsets::horizontal(6.0)));
        session.settle();
    }
    session.report("stacked");

    session.swipe(width * 0.5, width * 0.8);
    session.report("swiped right");

    session.swipe(width * 0.8, width * 0.3);
    session.report("swiped left");

    session.deck.show_first();
    session.settle();
    session.report("show first");

    session.deck.show_next();
    session.settle();
    session.report("show next");

    if let Some(card) = session.deck.card_at(width * 0.75) {
        log::info!("tap at {} lands on {}", width * 0.75, card.id());
    }
    log::info!("{} children including the side panel", session.deck.child_count());
    Ok(())
}
