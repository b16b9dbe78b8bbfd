use std::io::{Read, Seek};

/// One raw upload, alive only for the duration of a validation call.
///
/// The stream is `Read + Seek` so the size check can measure the content and
/// rewind without consuming it; in the HTTP handlers this is a `Cursor` over
/// the multipart body.
#[derive(Debug)]
pub struct UploadAttempt<R: Read + Seek> {
    pub filename: String,
    pub stream: R,
}

impl<R: Read + Seek> UploadAttempt<R> {
    pub fn new(filename: impl Into<String>, stream: R) -> Self {
        Self {
            filename: filename.into(),
            stream,
        }
    }
}
