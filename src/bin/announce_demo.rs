//! Console demo: rides a short loop line and prints every header change.
//!
//! # Usage
//!
//! ```sh
//! cargo run --bin announce_demo --features demo
//! cargo run --bin announce_demo --features demo -- config.json
//! RUST_LOG=rs_nextstop=debug cargo run --bin announce_demo --features demo
//! ```
//!
//! The optional argument is a JSON config document; missing fields take
//! their defaults.

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rs_nextstop::hal::{MockClock, MockDirectory};
use rs_nextstop::station::{Line, LocalizedNames, LoopDirection, LoopTopology, Station};
use rs_nextstop::traits::{AnnouncementDisplay, Clock};
use rs_nextstop::{
    AnnouncementController, AnnouncementSnapshot, Config, DetectorUpdate, JourneySelection,
};

const LOOP_LINE_ID: u32 = 11302;

/// Prints snapshots as a two-line header.
struct ConsoleDisplay {
    last: Option<AnnouncementSnapshot>,
}

impl AnnouncementDisplay for ConsoleDisplay {
    type Error = std::convert::Infallible;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.last = None;
        Ok(())
    }

    fn render(&mut self, snapshot: &AnnouncementSnapshot) -> Result<(), Self::Error> {
        if self.last.as_ref() == Some(snapshot) {
            return Ok(());
        }
        let state = snapshot.state_text.replace('\n', " ");
        println!(
            "[{:<13}] {} | {} {} {}",
            snapshot.header_state().to_string(),
            snapshot.bound_text,
            state,
            snapshot.station_text,
            snapshot.state_text_right,
        );
        self.last = Some(snapshot.clone());
        Ok(())
    }
}

fn init_logger() {
    let default_level = LevelFilter::INFO;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

fn load_config() -> Result<Config> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            Config::from_json(&json).with_context(|| format!("parsing config {path}"))
        }
        None => Ok(Config::default()),
    }
}

fn station(id: u32, base: &str, kana: &str, roman: &str, zh: &str, ko: &str) -> Station {
    Station::new(
        id,
        id,
        LocalizedNames::base(base)
            .with_phonetic(kana)
            .with_roman(roman)
            .with_intl_a(zh)
            .with_intl_b(ko),
    )
}

fn loop_stations() -> Vec<Station> {
    vec![
        station(1, "東京", "トウキョウ", "Tokyo", "东京", "도쿄"),
        station(2, "神田", "カンダ", "Kanda", "神田", "간다"),
        station(3, "秋葉原", "アキハバラ", "Akihabara", "秋叶原", "아키하바라"),
        station(4, "上野", "ウエノ", "Ueno", "上野", "우에노"),
        station(5, "池袋", "イケブクロ", "Ikebukuro", "池袋", "이케부쿠로"),
        station(6, "新宿", "シンジュク", "Shinjuku", "新宿", "신주쿠"),
        station(7, "渋谷", "シブヤ", "Shibuya", "涩谷", "시부야"),
        station(8, "品川", "シナガワ", "Shinagawa", "品川", "시나가와"),
    ]
}

fn main() -> Result<()> {
    init_logger();
    let config = load_config()?;
    let period = config.announcement.transition_interval_ms;

    let line = Line::looped(LOOP_LINE_ID, LoopTopology::full([1, 4, 5, 6, 7, 8]));
    let directory = MockDirectory::new().with_line(LOOP_LINE_ID, loop_stations());
    let mut controller = AnnouncementController::new(directory, &config);
    let mut display = ConsoleDisplay { last: None };
    let mut clock = MockClock::new();

    let selection = JourneySelection::new(line, 6)
        .with_bound(1)
        .with_direction(LoopDirection::Outbound);
    controller
        .start_journey(selection, clock.now_ms())
        .context("starting journey")?;
    controller.render_to(&mut display)?;

    // Ride three stops: depart, approach for a few rotations, arrive.
    for stop in [5, 4, 3] {
        controller.apply_signal(DetectorUpdate::new(None, false, false), clock.now_ms());
        controller.render_to(&mut display)?;

        controller.set_approaching(true, clock.now_ms());
        for _ in 0..6 {
            clock.advance(period);
            controller.update(clock.now_ms());
            controller.render_to(&mut display)?;
        }

        controller.apply_signal(DetectorUpdate::new(Some(stop), true, false), clock.now_ms());
        controller.render_to(&mut display)?;
    }

    controller.teardown();
    display.clear()?;
    tracing::info!("ride finished");
    Ok(())
}
