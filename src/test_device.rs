//! In-process switcher emulator for tests.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::command::{COMMAND_TABLE, QUERY_OUTPUTS};
use crate::topology::OUTPUT_COUNT;

/// Listens on a loopback port and answers every request with `respond`.
///
/// Connections are served one after another. Returning `None` from
/// `respond` drops the current connection without a reply.
pub(crate) struct SimulatedDevice {
    port: u16,
    received: Arc<Mutex<Vec<String>>>,
    accepted: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl SimulatedDevice {
    pub(crate) fn start<F>(mut respond: F) -> Self
    where
        F: FnMut(&str) -> Option<Vec<u8>> + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let received = Arc::new(Mutex::new(Vec::new()));
        let accepted = Arc::new(AtomicUsize::new(0));
        let closed = Arc::new(AtomicUsize::new(0));

        let (log, acc, cls) = (received.clone(), accepted.clone(), closed.clone());
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                acc.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 64];
                loop {
                    let n = match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => n,
                    };
                    let request = String::from_utf8_lossy(&buf[..n]).into_owned();
                    log.lock().unwrap().push(request.clone());
                    match respond(&request) {
                        Some(reply) => {
                            if stream.write_all(&reply).is_err() {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                cls.fetch_add(1, Ordering::SeqCst);
            }
        });

        Self {
            port,
            received,
            accepted,
            closed,
        }
    }

    /// Emulates a real switcher: keeps a routing table and answers both
    /// route and query requests from it. Every output starts on input 0.
    pub(crate) fn matrix() -> Self {
        let mut routing = [0usize; OUTPUT_COUNT];
        Self::start(move |request| {
            if request == QUERY_OUTPUTS {
                let digits: Vec<String> = routing.iter().map(|i| i.to_string()).collect();
                return Some(format!("{}\r\n", digits.join("s")).into_bytes());
            }
            for (input, row) in COMMAND_TABLE.iter().enumerate() {
                if let Some(output) = row.iter().position(|code| *code == request) {
                    routing[output] = input;
                    return Some(format!("a{}{}\0\0\r\n", output + 1, input).into_bytes());
                }
            }
            Some(b"?".to_vec())
        })
    }

    /// Answers every request with the same bytes.
    pub(crate) fn fixed(reply: &'static [u8]) -> Self {
        Self::start(move |_| Some(reply.to_vec()))
    }

    pub(crate) fn port(&self) -> u16 {
        self.port
    }

    pub(crate) fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }

    pub(crate) fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    /// Waits until the device has seen `count` connections end.
    pub(crate) fn wait_closed(&self, count: usize) {
        for _ in 0..200 {
            if self.closed.load(Ordering::SeqCst) >= count {
                return;
            }
            thread::sleep(std::time::Duration::from_millis(10));
        }
        panic!(
            "device saw {} closed connections, expected {}",
            self.closed.load(Ordering::SeqCst),
            count
        );
    }
}
