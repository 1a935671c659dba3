//! Non-blocking TCP transport for the simulator.
//!
//! Mirrors the firmware stack's discipline: one connection serviced at a
//! time, one `poll` per scheduler pass, writes issued without blocking and
//! acknowledged back to the engine as the socket accepts them. The request
//! is taken from the first successful read, like the single-segment
//! assumption the device makes.

use std::io::{ErrorKind, Read, Write};
use std::net::{TcpListener, TcpStream};

use stratus_core::http::{HttpService, Transport};
use stratus_core::{StationError, StationResult};

pub struct TcpTransport {
    listener: TcpListener,
    peer: Option<TcpStream>,
    request_delivered: bool,
}

impl TcpTransport {
    /// Bind and switch to non-blocking accept/IO.
    pub fn bind(addr: &str) -> StationResult<Self> {
        let listener = TcpListener::bind(addr)
            .and_then(|l| l.set_nonblocking(true).map(|()| l))
            .map_err(|_| StationError::NetDown { reason: "bind failed" })?;
        Ok(Self { listener, peer: None, request_delivered: false })
    }

    fn accept(&mut self) {
        match self.listener.accept() {
            Ok((stream, addr)) => {
                if stream.set_nonblocking(true).is_err() {
                    return;
                }
                log::debug!("connection from {addr}");
                self.peer = Some(stream);
                self.request_delivered = false;
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => {}
            Err(e) => log::warn!("accept failed: {e}"),
        }
    }
}

impl Transport for TcpTransport {
    fn poll(&mut self, service: &mut dyn HttpService) {
        if self.peer.is_none() {
            self.accept();
        }
        // Take the stream out while servicing; putting it back means the
        // exchange continues on the next pass, dropping it closes the
        // socket.
        let Some(mut stream) = self.peer.take() else { return };

        if !self.request_delivered {
            let mut buf = [0u8; 2048];
            match stream.read(&mut buf) {
                Ok(0) => {
                    service.connection_closed();
                    return;
                }
                Ok(n) => {
                    self.request_delivered = true;
                    if !service.handle_request(&buf[..n]) {
                        // No response could be prepared; drop silently
                        service.connection_closed();
                        return;
                    }
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => {
                    self.peer = Some(stream);
                    return;
                }
                Err(_) => {
                    service.connection_closed();
                    return;
                }
            }
        }

        loop {
            let chunk: Vec<u8> = match service.pending() {
                // Declared length fully acknowledged: tear down
                None => return,
                Some(pending) => pending.to_vec(),
            };
            match stream.write(&chunk) {
                Ok(0) => {
                    service.connection_closed();
                    return;
                }
                Ok(n) => service.mark_sent(n),
                Err(e) if e.kind() == ErrorKind::WouldBlock => {
                    self.peer = Some(stream);
                    return;
                }
                Err(_) => {
                    service.connection_closed();
                    return;
                }
            }
        }
    }
}
