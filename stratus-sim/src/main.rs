//! Host simulator for the Stratus node.
//!
//! Runs the exact engine firmware runs — same scheduler, same dispatcher,
//! same codec — against synthetic sensors and a real TCP listener, so the
//! dashboard and API can be exercised with a browser or curl:
//!
//! ```text
//! RUST_LOG=debug cargo run -p stratus-sim
//! curl http://127.0.0.1:8080/api/data
//! ```

mod board;
mod net;

use std::thread;
use std::time::Duration;

use stratus_core::time::StdClock;
use stratus_core::ui::ButtonMailbox;
use stratus_core::Station;

use crate::board::SimBoard;
use crate::net::TcpTransport;

const LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Pause between scheduler passes, as on the device.
const PASS_SLEEP_MS: u64 = 10;

fn main() {
    env_logger::init();
    log::info!("stratus-sim {} listening on {LISTEN_ADDR}", stratus_core::VERSION);

    let mut station: Station = Station::new();
    let mut board = SimBoard::new();
    let mailbox = ButtonMailbox::new();
    let clock = StdClock::new();

    let mut transport = match TcpTransport::bind(LISTEN_ADDR) {
        Ok(t) => t,
        Err(e) => {
            // The device keeps running standalone in this case; the
            // simulator has nothing else to show, so bail out.
            log::error!("http server not started: {e}");
            std::process::exit(1);
        }
    };

    loop {
        station.run_pass(&mut board, &mut transport, &mailbox, &clock);
        thread::sleep(Duration::from_millis(PASS_SLEEP_MS));
    }
}
