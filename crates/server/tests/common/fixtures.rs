//! Test fixtures for generating request data.

use axum::body::Body;
use axum::http::Request;
use bytes::Bytes;
use serde_json::{Value, json};

/// Generate deterministic test data using a seeded pseudo-random generator.
#[allow(dead_code)]
pub fn seeded_bytes(seed: u64, len: usize) -> Bytes {
    let mut data = vec![0u8; len];
    let mut state = seed;

    for chunk in data.chunks_mut(8) {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let bytes = state.to_le_bytes();
        for (i, byte) in chunk.iter_mut().enumerate() {
            *byte = bytes[i % 8];
        }
    }

    Bytes::from(data)
}

/// Book fields as a client would post them, numbers as strings.
#[allow(dead_code)]
pub fn book_json(name: &str, author: &str) -> Value {
    json!({
        "name": name,
        "author": author,
        "year": "1949",
        "genre": "dystopia",
        "pages": "328",
        "publisher": "Secker & Warburg",
    })
}

/// Author fields as a client would post them.
#[allow(dead_code)]
pub fn author_json(name: &str, date_of_death: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{name} wrote books"),
        "date_of_birth": "1903",
        "date_of_death": date_of_death,
    })
}

/// Boundary used by [`MultipartBody`].
pub const BOUNDARY: &str = "shelf-test-boundary";

/// Builder for `multipart/form-data` request bodies. Parts keep their order.
#[allow(dead_code)]
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

#[allow(dead_code)]
impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain form field.
    pub fn text(mut self, name: &str, value: impl AsRef<[u8]>) -> Self {
        self.body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                .as_bytes(),
        );
        self.body.extend_from_slice(value.as_ref());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Add a file part.
    pub fn file(mut self, name: &str, filename: &str, content: impl AsRef<[u8]>) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(content.as_ref());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Finish the body and wrap it in a POST to `uri`.
    pub fn into_request(mut self, uri: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::post(uri)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.body))
            .unwrap()
    }
}
