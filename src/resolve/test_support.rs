//! Minimal HTTP stubs for resolver tests.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

/// Read a request up to the end of its header block.
fn read_request_head(stream: &mut TcpStream) -> String {
	let mut buf = Vec::new();
	let mut chunk = [0u8; 512];
	while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
		match stream.read(&mut chunk) {
			Ok(0) | Err(_) => break,
			Ok(n) => buf.extend_from_slice(&chunk[..n]),
		}
	}
	String::from_utf8_lossy(&buf).into_owned()
}

/// Serve one canned response. Returns the URL to hit and the received request head.
pub(crate) fn serve_once(response: &'static str) -> (String, Receiver<String>) {
	let listener = TcpListener::bind("127.0.0.1:0").unwrap();
	let addr = listener.local_addr().unwrap();
	let (tx, rx) = mpsc::channel();

	thread::spawn(move || {
		let (mut stream, _) = listener.accept().unwrap();
		let request = read_request_head(&mut stream);
		let _ = tx.send(request);
		let _ = stream.write_all(response.as_bytes());
		let _ = stream.flush();
	});

	(format!("http://{addr}/abc"), rx)
}

/// Accept one connection and never answer it within `hold`.
pub(crate) fn serve_stalled(hold: Duration) -> String {
	let listener = TcpListener::bind("127.0.0.1:0").unwrap();
	let addr = listener.local_addr().unwrap();

	thread::spawn(move || {
		if let Ok((mut stream, _)) = listener.accept() {
			let _ = read_request_head(&mut stream);
			thread::sleep(hold);
		}
	});

	format!("http://{addr}/slow")
}

/// A URL on a local port nothing listens on.
pub(crate) fn refused_url() -> String {
	let listener = TcpListener::bind("127.0.0.1:0").unwrap();
	let addr = listener.local_addr().unwrap();
	drop(listener);
	format!("http://{addr}/gone")
}
