#![allow(dead_code)]

use std::path::Path;

use axum::{
    body::Body,
    extract::Request,
    http::{header, Method},
};
use bytes::Bytes;
use futures::{stream, StreamExt};
use tracing_subscriber::EnvFilter;

pub const BOUNDARY: &str = "file-toolkit-test-boundary";

/// 1x1 RGBA PNG.
pub const PNG_IMAGE: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct Part<'a> {
    pub field: &'a str,
    pub file_name: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn file(field: &'a str, file_name: &'a str, data: &'a [u8]) -> Self {
        Self {
            field,
            file_name: Some(file_name),
            content_type: Some("application/octet-stream"),
            data,
        }
    }

    pub fn text(field: &'a str, value: &'a str) -> Self {
        Self {
            field,
            file_name: None,
            content_type: None,
            data: value.as_bytes(),
        }
    }

    pub fn declared_as(mut self, content_type: &'a str) -> Self {
        self.content_type = Some(content_type);
        self
    }
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    part.field, file_name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.field).as_bytes(),
            ),
        }
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn request_builder(uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
}

/// Request with the whole body in memory and a `Content-Length` header.
pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request {
    let body = multipart_body(parts);
    request_builder(uri)
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap()
}

/// Request streamed in `chunk_size` pieces without a `Content-Length` header.
pub fn streamed_multipart_request(uri: &str, parts: &[Part<'_>], chunk_size: usize) -> Request {
    let chunks: Vec<Result<Bytes, std::io::Error>> = multipart_body(parts)
        .chunks(chunk_size)
        .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
        .collect();

    request_builder(uri)
        .body(Body::from_stream(stream::iter(chunks)))
        .unwrap()
}

/// Like [`streamed_multipart_request`] but yields to the runtime before each
/// chunk, so the body arrives over several polls as it would from a socket.
pub fn paced_multipart_request(uri: &str, parts: &[Part<'_>], chunk_size: usize) -> Request {
    let chunks: Vec<Bytes> = multipart_body(parts)
        .chunks(chunk_size)
        .map(Bytes::copy_from_slice)
        .collect();
    let paced = stream::iter(chunks).then(|chunk| async move {
        tokio::task::yield_now().await;
        Ok::<_, std::io::Error>(chunk)
    });

    request_builder(uri)
        .body(Body::from_stream(paced))
        .unwrap()
}

pub fn dir_entries(dir: &Path) -> Vec<String> {
    if !dir.exists() {
        return Vec::new();
    }
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
