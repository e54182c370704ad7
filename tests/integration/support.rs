//! Shared fixtures: project trees, a recording index and a tiny HTTP server

use parking_lot::Mutex;
use reqwalker::error::{ReqwalkerError, Result};
use reqwalker::resolver::PackageIndex;
use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::thread;

/// Write `files` (relative path, content) below `root`
pub fn write_project(root: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

/// Write a `.dist-info` entry for `name` `version` into `site_packages`
pub fn install(site_packages: &Path, name: &str, version: &str) {
    let dist_info = site_packages.join(format!("{}-{}.dist-info", name, version));
    fs::create_dir_all(&dist_info).unwrap();
    fs::write(
        dist_info.join("METADATA"),
        format!("Metadata-Version: 2.1\nName: {}\nVersion: {}\n", name, version),
    )
    .unwrap();
}

/// Index answering from a fixed table and recording every query
#[derive(Default)]
pub struct FixedIndex {
    versions: HashMap<String, String>,
    pub calls: Mutex<Vec<String>>,
}

impl FixedIndex {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            versions: entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl PackageIndex for FixedIndex {
    fn latest_version(&self, package: &str) -> Result<String> {
        self.calls.lock().push(package.to_string());
        self.versions.get(package).cloned().ok_or(ReqwalkerError::IndexStatus {
            package: package.to_string(),
            status: 404,
        })
    }
}

/// Serve `routes` (request path -> status and body) on a loopback port.
///
/// Unknown paths answer 404. Returns the base URL, e.g. `http://127.0.0.1:41234`.
/// The server thread lives until the test process exits.
pub fn serve(routes: Vec<(&str, u16, Vec<u8>)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let routes: HashMap<String, (u16, Vec<u8>)> = routes
        .into_iter()
        .map(|(path, status, body)| (path.to_string(), (status, body)))
        .collect();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { continue };
            respond(stream, &routes);
        }
    });

    base_url
}

fn respond(mut stream: TcpStream, routes: &HashMap<String, (u16, Vec<u8>)>) {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    let request = String::from_utf8_lossy(&request);
    let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

    let (status, body) = routes
        .get(&path)
        .cloned()
        .unwrap_or((404, b"{\"message\": \"Not Found\"}".to_vec()));
    let reason = if status == 200 { "OK" } else { "Not Found" };

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&body);
    let _ = stream.flush();
}

/// PyPI JSON body announcing `version`
pub fn pypi_body(version: &str) -> Vec<u8> {
    format!("{{\"info\": {{\"name\": \"pkg\", \"version\": \"{}\"}}, \"releases\": {{}}}}", version).into_bytes()
}
