//! Scripted origin server for end-to-end tests

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};

/// Origin that answers one connection per scripted response, in order
pub struct Origin {
    pub addr: SocketAddr,
    handle: JoinHandle<Vec<String>>,
}

impl Origin {
    pub fn serve(responses: Vec<Vec<u8>>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let mut requests = Vec::new();
            for response in responses {
                let (mut stream, _) = listener.accept().unwrap();
                requests.push(read_request(&mut stream));
                stream.write_all(&response).unwrap();
                stream.flush().unwrap();
            }
            requests
        });

        Self { addr, handle }
    }

    /// `127.0.0.1:<port><path>`
    pub fn url(&self, path: &str) -> String {
        format!("127.0.0.1:{}{path}", self.addr.port())
    }

    /// Requests received, in arrival order
    pub fn requests(self) -> Vec<String> {
        self.handle.join().unwrap()
    }
}

fn read_request(stream: &mut impl Read) -> String {
    let mut request = Vec::new();
    let mut byte = [0u8; 1];
    while !request.ends_with(b"\r\n\r\n") {
        if stream.read(&mut byte).unwrap() == 0 {
            break;
        }
        request.push(byte[0]);
    }
    String::from_utf8(request).unwrap()
}

pub fn ok_response(last_modified: Option<&str>, body: &[u8]) -> Vec<u8> {
    let mut response = b"HTTP/1.1 200 OK\r\n".to_vec();
    if let Some(stamp) = last_modified {
        response.extend_from_slice(format!("Last-Modified: {stamp}\r\n").as_bytes());
    }
    response.extend_from_slice(format!("Content-Length: {}\r\n\r\n", body.len()).as_bytes());
    response.extend_from_slice(body);
    response
}

pub fn not_modified_response() -> Vec<u8> {
    b"HTTP/1.1 304 Not Modified\r\nDate: Tue, 03 Jan 2023 09:00:00 GMT\r\n\r\n".to_vec()
}
