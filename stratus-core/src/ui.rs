//! Buttons and local display pages
//!
//! ## Button mailbox
//!
//! Button edges arrive in interrupt context. The handler does nothing but
//! debounce-check a timestamp and set a flag; all real work happens when
//! the scheduler drains the mailbox once per pass. The mailbox is the only
//! state shared across execution contexts, so it is built from atomics and
//! usable through `&self` from a `static`.
//!
//! The 200 ms refractory window is **shared across both buttons**: an edge
//! on either button arms the window for both. This cross-button
//! suppression is inherited behavior and reproduced deliberately (see
//! DESIGN.md).
//!
//! ## Pages
//!
//! The page button cycles three fixed layouts: live readings, configured
//! limits, network status. Rendering produces pre-formatted text pushed
//! into a [`TextDisplay`] sink; the panel refreshes on the next tick, not
//! on the button edge itself.

use core::fmt::Write;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use heapless::String;

use crate::config::Config;
use crate::constants::DEBOUNCE_MS;
use crate::reading::Reading;
use crate::time::Millis;
use crate::traits::{Link, TextDisplay};

/// The two physical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Page-cycle button
    A,
    /// Reset button
    B,
}

/// Edges drained from the mailbox in one scheduler pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonEvents {
    /// Page-cycle edge pending
    pub a: bool,
    /// Reset edge pending
    pub b: bool,
}

/// Single-slot mailbox between interrupt context and the scheduler.
///
/// Single writer (the ISR) per flag, single reader (the scheduler) per
/// cycle; relaxed ordering is sufficient under that discipline.
pub struct ButtonMailbox {
    a: AtomicBool,
    b: AtomicBool,
    last_event_ms: AtomicU32,
}

impl ButtonMailbox {
    /// Empty mailbox with the debounce window already expired, so an edge
    /// at t=0 is honored.
    pub const fn new() -> Self {
        Self {
            a: AtomicBool::new(false),
            b: AtomicBool::new(false),
            last_event_ms: AtomicU32::new(0u32.wrapping_sub(DEBOUNCE_MS as u32)),
        }
    }

    /// Record an edge from interrupt context. Flag-set and timestamp only;
    /// no buffer, JSON or network work happens here.
    pub fn note(&self, button: Button, now: Millis) {
        let now = now as u32;
        let last = self.last_event_ms.load(Ordering::Relaxed);
        if now.wrapping_sub(last) < DEBOUNCE_MS as u32 {
            return;
        }
        self.last_event_ms.store(now, Ordering::Relaxed);
        match button {
            Button::A => self.a.store(true, Ordering::Relaxed),
            Button::B => self.b.store(true, Ordering::Relaxed),
        }
    }

    /// Drain pending edges. Called once per scheduler pass.
    pub fn take(&self) -> ButtonEvents {
        ButtonEvents {
            a: self.a.swap(false, Ordering::Relaxed),
            b: self.b.swap(false, Ordering::Relaxed),
        }
    }
}

impl Default for ButtonMailbox {
    fn default() -> Self {
        Self::new()
    }
}

/// The three display pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Live readings plus alarm banner
    #[default]
    Overview,
    /// Configured bands
    Limits,
    /// Link state and address
    Network,
}

impl Page {
    /// Cycle order: Overview → Limits → Network → Overview.
    pub fn next(self) -> Self {
        match self {
            Page::Overview => Page::Limits,
            Page::Limits => Page::Network,
            Page::Network => Page::Overview,
        }
    }
}

/// Everything page rendering reads.
pub struct PageView<'a> {
    /// Latest offset-adjusted reading
    pub reading: &'a Reading,
    /// Current thresholds
    pub config: &'a Config,
    /// Alarm banner on the overview page
    pub alarm_active: bool,
    /// Link state for the network page
    pub link: Link,
}

/// Draw one page into the display sink and flush it.
pub fn render<D: TextDisplay>(display: &mut D, page: Page, view: &PageView<'_>) {
    let mut line: String<22> = String::new();
    display.clear();

    match page {
        Page::Overview => {
            display.text("STATION", 20, 0);
            display.hline(10);

            let _ = write!(line, "Temp: {:.1}C", view.reading.temperature);
            display.text(&line, 0, 15);

            line.clear();
            let _ = write!(line, "Humid: {:.1}%", view.reading.humidity);
            display.text(&line, 0, 25);

            line.clear();
            let _ = write!(line, "Press: {:.0}hPa", view.reading.pressure);
            display.text(&line, 0, 35);

            line.clear();
            let _ = write!(line, "Alt: {:.0}m", view.reading.altitude);
            display.text(&line, 0, 45);

            if view.alarm_active {
                display.text("! ALARM !", 30, 55);
            }
        }
        Page::Limits => {
            display.text("LIMITS", 25, 0);
            display.hline(10);

            let _ = write!(line, "T: {:.0}-{:.0}C", view.config.temp_min, view.config.temp_max);
            display.text(&line, 0, 15);

            line.clear();
            let _ = write!(line, "H: {:.0}-{:.0}%", view.config.humid_min, view.config.humid_max);
            display.text(&line, 0, 25);

            line.clear();
            let _ = write!(line, "P: {:.0}-{:.0}", view.config.press_min, view.config.press_max);
            display.text(&line, 0, 35);

            display.text("Button A: next", 0, 55);
        }
        Page::Network => {
            display.text("NETWORK", 25, 0);
            display.hline(10);

            match view.link {
                Link::Up(ip) => {
                    display.text("Connected", 30, 20);
                    let _ = write!(line, "{}.{}.{}.{}", ip[0], ip[1], ip[2], ip[3]);
                    display.text(&line, 15, 35);
                }
                Link::Down => {
                    display.text("Disconnected", 20, 25);
                }
            }
        }
    }

    display.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PAGE_COUNT;

    #[test]
    fn page_cycle_wraps() {
        let mut page = Page::default();
        for _ in 0..PAGE_COUNT {
            page = page.next();
        }
        assert_eq!(page, Page::Overview);
    }

    #[test]
    fn edge_at_boot_is_honored() {
        let mailbox = ButtonMailbox::new();
        mailbox.note(Button::A, 0);
        assert_eq!(mailbox.take(), ButtonEvents { a: true, b: false });
        // Drained: a second take is empty
        assert_eq!(mailbox.take(), ButtonEvents::default());
    }

    #[test]
    fn debounce_suppresses_across_buttons() {
        let mailbox = ButtonMailbox::new();
        mailbox.note(Button::A, 0);
        // B inside A's window: suppressed
        mailbox.note(Button::B, 100);
        assert_eq!(mailbox.take(), ButtonEvents { a: true, b: false });
        // B outside the window: honored
        mailbox.note(Button::B, 250);
        assert_eq!(mailbox.take(), ButtonEvents { a: false, b: true });
    }

    #[test]
    fn honored_edge_rearms_the_window() {
        let mailbox = ButtonMailbox::new();
        mailbox.note(Button::A, 1000);
        mailbox.note(Button::A, 1150); // suppressed
        mailbox.note(Button::A, 1250); // honored, window from 1000 expired
        let events = mailbox.take();
        assert!(events.a);
    }

    struct RecordingDisplay {
        lines: Vec<(std::string::String, u8, u8)>,
        flushed: bool,
    }

    impl TextDisplay for RecordingDisplay {
        fn clear(&mut self) {
            self.lines.clear();
            self.flushed = false;
        }
        fn text(&mut self, s: &str, x: u8, y: u8) {
            self.lines.push((s.into(), x, y));
        }
        fn hline(&mut self, _y: u8) {}
        fn flush(&mut self) {
            self.flushed = true;
        }
    }

    fn view_fixture<'a>(reading: &'a Reading, config: &'a Config) -> PageView<'a> {
        PageView { reading, config, alarm_active: true, link: Link::Up([192, 168, 0, 7]) }
    }

    #[test]
    fn overview_page_shows_readings_and_banner() {
        let reading = Reading {
            temperature: 23.46,
            humidity: 48.2,
            pressure: 1001.6,
            altitude: 97.2,
        };
        let config = Config::default();
        let mut display = RecordingDisplay { lines: vec![], flushed: false };

        render(&mut display, Page::Overview, &view_fixture(&reading, &config));

        let texts: Vec<&str> = display.lines.iter().map(|(s, _, _)| s.as_str()).collect();
        assert!(texts.contains(&"Temp: 23.5C"));
        assert!(texts.contains(&"Humid: 48.2%"));
        assert!(texts.contains(&"Press: 1002hPa"));
        assert!(texts.contains(&"Alt: 97m"));
        assert!(texts.contains(&"! ALARM !"));
        assert!(display.flushed);
    }

    #[test]
    fn network_page_shows_address() {
        let reading = Reading::default();
        let config = Config::default();
        let mut display = RecordingDisplay { lines: vec![], flushed: false };

        render(&mut display, Page::Network, &view_fixture(&reading, &config));

        let texts: Vec<&str> = display.lines.iter().map(|(s, _, _)| s.as_str()).collect();
        assert!(texts.contains(&"Connected"));
        assert!(texts.contains(&"192.168.0.7"));
    }
}
