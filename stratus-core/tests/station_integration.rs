//! End-to-end tests: scripted sensors, scripted clock, in-memory transport.
//!
//! These drive the real `Station` through `run_pass` exactly as firmware
//! would, and assert on the bytes that leave the HTTP seam.

use std::collections::VecDeque;

use stratus_core::alarm::{Glyph, IndicatorState};
use stratus_core::http::{HttpService, Transport};
use stratus_core::reading::{BaroSample, ClimateSample};
use stratus_core::time::FixedClock;
use stratus_core::traits::{Board, Link, TextDisplay};
use stratus_core::ui::ButtonMailbox;
use stratus_core::{Station, StationError, StationResult};

/// Display fake that remembers the last flushed frame.
#[derive(Default)]
struct FrameDisplay {
    current: Vec<String>,
    flushed: Vec<String>,
}

impl TextDisplay for FrameDisplay {
    fn clear(&mut self) {
        self.current.clear();
    }
    fn text(&mut self, s: &str, _x: u8, _y: u8) {
        self.current.push(s.to_string());
    }
    fn hline(&mut self, _y: u8) {}
    fn flush(&mut self) {
        self.flushed = self.current.clone();
    }
}

/// Board fake with a scripted sample sequence.
struct ScriptBoard {
    samples: VecDeque<(ClimateSample, BaroSample)>,
    display: FrameDisplay,
    indicators: Vec<IndicatorState>,
    glyphs: Vec<Glyph>,
    beeps: Vec<u32>,
}

impl ScriptBoard {
    fn new(samples: Vec<(f32, f32, f32)>) -> Self {
        Self {
            samples: samples
                .into_iter()
                .map(|(t, h, p)| {
                    (
                        ClimateSample { temperature: t, humidity: h },
                        BaroSample { temperature: t, pressure: p },
                    )
                })
                .collect(),
            display: FrameDisplay::default(),
            indicators: vec![],
            glyphs: vec![],
            beeps: vec![],
        }
    }
}

impl Board for ScriptBoard {
    type Display = FrameDisplay;
    fn climate(&mut self) -> StationResult<ClimateSample> {
        self.samples
            .front()
            .map(|(c, _)| *c)
            .ok_or(StationError::SensorUnavailable)
    }
    fn baro(&mut self) -> BaroSample {
        let (_, baro) = self.samples.pop_front().expect("baro read without climate data");
        baro
    }
    fn indicator(&mut self, state: IndicatorState) {
        self.indicators.push(state);
    }
    fn beep(&mut self, ms: u32) {
        self.beeps.push(ms);
    }
    fn glyph(&mut self, glyph: Glyph) {
        self.glyphs.push(glyph);
    }
    fn display(&mut self) -> &mut FrameDisplay {
        &mut self.display
    }
    fn link(&self) -> Link {
        Link::Up([10, 0, 0, 2])
    }
    fn reset(&mut self) {}
}

/// In-memory transport: queued requests in, completed responses out.
/// Sends in small chunks to exercise the acknowledgment path.
struct MemTransport {
    inbox: VecDeque<Vec<u8>>,
    wire: Vec<u8>,
    responses: Vec<Vec<u8>>,
    chunk: usize,
}

impl MemTransport {
    fn new(chunk: usize) -> Self {
        Self { inbox: VecDeque::new(), wire: vec![], responses: vec![], chunk }
    }

    fn push_request(&mut self, request: &[u8]) {
        self.inbox.push_back(request.to_vec());
    }
}

impl Transport for MemTransport {
    fn poll(&mut self, service: &mut dyn HttpService) {
        if service.pending().is_none() {
            let Some(request) = self.inbox.pop_front() else { return };
            self.wire.clear();
            if !service.handle_request(&request) {
                // Dropped without a response
                return;
            }
        }

        loop {
            let chunk: Vec<u8> = match service.pending() {
                None => break,
                Some(pending) => pending[..pending.len().min(self.chunk)].to_vec(),
            };
            self.wire.extend_from_slice(&chunk);
            service.mark_sent(chunk.len());
            if service.pending().is_none() {
                self.responses.push(std::mem::take(&mut self.wire));
                break;
            }
        }
    }
}

fn body_of(response: &[u8]) -> String {
    let text = String::from_utf8(response.to_vec()).unwrap();
    text.split("\r\n\r\n").nth(1).unwrap().to_string()
}

#[test]
fn three_samples_alarm_and_history_on_the_wire() {
    let mut station: Station = Station::new();
    let mut board = ScriptBoard::new(vec![
        (20.0, 50.0, 1000.0),
        (21.0, 51.0, 1001.0),
        (22.0, 52.0, 1002.0),
    ]);
    let mut transport = MemTransport::new(97);
    let mailbox = ButtonMailbox::new();
    let mut clock = FixedClock::new(0);

    // Lower temp_max to 21 over the wire before the samples arrive
    transport.push_request(
        b"POST /api/config HTTP/1.1\r\nContent-Type: application/json\r\n\r\n\
          {\"temp_min\":10.0,\"temp_max\":21.0,\
          \"humid_min\":20.0,\"humid_max\":80.0,\
          \"press_min\":900.0,\"press_max\":1100.0,\
          \"temp_offset\":0.0,\"humid_offset\":0.0,\"press_offset\":0.0}",
    );
    station.run_pass(&mut board, &mut transport, &mailbox, &clock);
    assert_eq!(station.config().temp_max, 21.0);
    assert_eq!(body_of(&transport.responses[0]), "OK");
    // Config write confirmation pulse
    assert!(board.beeps.contains(&50));

    // Samples 1 and 2 are inside the band; sample 3 breaches temp_max
    assert!(!station.alarm().active);
    clock.advance(1000);
    station.run_pass(&mut board, &mut transport, &mailbox, &clock);
    assert!(!station.alarm().active);
    clock.advance(1000);
    station.run_pass(&mut board, &mut transport, &mailbox, &clock);
    assert!(station.alarm().active);
    assert!(station.alarm().temperature);
    assert!(!station.alarm().humidity);
    assert!(!station.alarm().pressure);

    // Alarm side effects: bright blink phase with pulse and glyph
    assert_eq!(board.indicators.last(), Some(&IndicatorState::AlarmBright));
    assert!(board.beeps.contains(&100));
    assert_eq!(board.glyphs.last(), Some(&Glyph::Alarm));
    assert!(board.display.flushed.contains(&"! ALARM !".to_string()));

    // Live telemetry on the wire
    transport.push_request(b"GET /api/data HTTP/1.1\r\n\r\n");
    clock.advance(10); // between ticks: network only
    station.run_pass(&mut board, &mut transport, &mailbox, &clock);

    let body = body_of(&transport.responses[1]);
    assert!(body.starts_with("{\"temperature\":22.00,\"humidity\":52.00,\"pressure\":1002.00,"));
    assert!(body.contains("\"history\":{\"temperature\":[20.0,21.0,22.0],"));
    assert!(body.contains("\"humidity\":[50.0,51.0,52.0],"));
    assert!(body.contains("\"pressure\":[1000.0,1001.0,1002.0]}"));
    assert!(body.contains("\"alert\":\"Values out of configured limits!\""));
}

#[test]
fn config_get_reflects_a_posted_prefix() {
    let mut station: Station = Station::new();
    let mut board = ScriptBoard::new(vec![(22.0, 50.0, 1000.0)]);
    let mut transport = MemTransport::new(4096);
    let mailbox = ButtonMailbox::new();
    let clock = FixedClock::new(0);

    // Document stops being well-formed after humid_min: prefix applies
    transport.push_request(
        b"POST /api/config HTTP/1.1\r\n\r\n\
          {\"temp_min\":5.0,\"temp_max\":40.0,\"humid_min\":11.5,\"humid_max\":oops",
    );
    station.run_pass(&mut board, &mut transport, &mailbox, &clock);

    transport.push_request(b"GET /api/config HTTP/1.1\r\n\r\n");
    station.run_pass(&mut board, &mut transport, &mailbox, &clock);

    let body = body_of(&transport.responses[1]);
    assert_eq!(
        body,
        "{\"temp_min\":5.0,\"temp_max\":40.0,\
         \"humid_min\":11.5,\"humid_max\":80.0,\
         \"press_min\":900.0,\"press_max\":1100.0,\
         \"temp_offset\":0.0,\"humid_offset\":0.0,\"press_offset\":0.0}"
    );
}

#[test]
fn dashboard_page_round_trip_in_chunks() {
    let mut station: Station = Station::new();
    let mut board = ScriptBoard::new(vec![(22.0, 50.0, 1000.0)]);
    let mut transport = MemTransport::new(333);
    let mailbox = ButtonMailbox::new();
    let clock = FixedClock::new(0);

    transport.push_request(b"GET / HTTP/1.1\r\nHost: station\r\n\r\n");
    station.run_pass(&mut board, &mut transport, &mailbox, &clock);

    let response = String::from_utf8(transport.responses[0].clone()).unwrap();
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Content-Type: text/html\r\n"));
    assert!(response.contains("Connection: close\r\n"));
    assert!(response.ends_with("</html>"));

    let declared: usize = response
        .lines()
        .find_map(|l| l.strip_prefix("Content-Length: "))
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(declared, body_of(&transport.responses[0]).len());
}

#[test]
fn wraparound_history_over_the_wire() {
    // More samples than the ring holds: the JSON window stays at N entries
    const N: usize = 50;
    let samples: Vec<(f32, f32, f32)> =
        (0..N + 5).map(|i| (i as f32, 50.0, 1000.0)).collect();

    let mut station: Station = Station::new();
    let mut board = ScriptBoard::new(samples);
    let mut transport = MemTransport::new(4096);
    let mailbox = ButtonMailbox::new();
    let mut clock = FixedClock::new(0);

    for _ in 0..N + 5 {
        station.run_pass(&mut board, &mut transport, &mailbox, &clock);
        clock.advance(1000);
    }

    transport.push_request(b"GET /api/data HTTP/1.1\r\n\r\n");
    station.run_pass(&mut board, &mut transport, &mailbox, &clock);

    let body = body_of(&transport.responses[0]);
    let temps = body
        .split("\"history\":{\"temperature\":[")
        .nth(1)
        .unwrap()
        .split(']')
        .next()
        .unwrap();
    let values: Vec<&str> = temps.split(',').collect();
    assert_eq!(values.len(), N);
    // Oldest surviving sample is push number 5
    assert_eq!(values[0], "5.0");
    assert_eq!(values[N - 1], "54.0");
}
