//! Streaming Converter.
//!
//! One synchronous pass: rows are read, turned into vCards, and written one at
//! a time. A host may run the pass on a worker thread and talk to it only
//! through a [`CancelToken`] and a [`ProgressSink`].

mod cancel;
mod progress;
mod stream;

pub use cancel::CancelToken;
pub use progress::{ProgressChannel, ProgressEvent, ProgressSink};
pub use stream::{ConvertOptions, StreamState, stream_convert, stream_rows};
