//! Local HTTP server standing in for nodejs.org and the Electron catalog.

use std::collections::HashMap;
use std::thread;

pub struct TestServer {
    base: String,
}

impl TestServer {
    /// Serves fixed `(path, status, body)` routes; anything else is a 404.
    pub fn start(routes: Vec<(&str, u16, Vec<u8>)>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let routes: HashMap<String, (u16, Vec<u8>)> = routes
            .into_iter()
            .map(|(path, status, body)| (path.to_string(), (status, body)))
            .collect();

        thread::spawn(move || {
            for request in server.incoming_requests() {
                let (status, body) = routes
                    .get(request.url())
                    .cloned()
                    .unwrap_or((404, b"not found".to_vec()));
                let response = tiny_http::Response::from_data(body).with_status_code(status);
                let _ = request.respond(response);
            }
        });

        Self {
            base: format!("http://{}", addr),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}
