use std::{
    future::Future,
    io,
    sync::{
        Arc,
        Mutex,
        MutexGuard,
    },
};
use tracing::Dispatch;
use tracing_subscriber::{
    EnvFilter,
    fmt::MakeWriter,
    layer::SubscriberExt,
    registry,
};

/// A fake writer that writes into a buffer (behind a mutex).
#[derive(Default, Debug, Clone)]
pub struct MockWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MockWriter {
    /// Create a new `MockWriter` that writes into the specified buffer (behind a mutex).
    pub fn new(buf: Arc<Mutex<Vec<u8>>>) -> Self {
        Self { buf }
    }

    /// Give access to the internal buffer (behind a `MutexGuard`).
    fn buf(&self) -> io::Result<MutexGuard<'_, Vec<u8>>> {
        // Note: The `lock` will block. This would be a problem in production code,
        // but is fine in tests.
        self.buf
            .lock()
            .map_err(|_| io::Error::from(io::ErrorKind::Other))
    }

    /// Everything written so far, split into lines.
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.buf().map(|buf| buf.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(|line| line.to_string())
            .collect()
    }
}

impl io::Write for MockWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Lock target buffer
        let mut target = self.buf()?;
        target.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.buf()?.flush()
    }
}

impl MakeWriter<'_> for MockWriter {
    type Writer = Self;

    fn make_writer(&self) -> Self::Writer {
        MockWriter::new(self.buf.clone())
    }
}

/// Return a new subscriber that writes to the specified [`MockWriter`].
pub fn get_subscriber(mock_writer: MockWriter) -> Dispatch {
    use tracing_subscriber::Layer;

    let fmt = tracing_subscriber::fmt::Layer::default()
        .with_writer(mock_writer)
        .with_ansi(false)
        .with_level(true)
        .with_line_number(true)
        .boxed();

    let registry = registry::Registry::default()
        .with(fmt)
        .with(EnvFilter::new("info"));
    registry.into()
}

/// Capture logs emitted on the current thread during the execution of the
/// provided closure.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    let writer = MockWriter::default();
    let dispatch = get_subscriber(writer.clone());

    let result = tracing::dispatcher::with_default(&dispatch, f);

    (result, writer.lines())
}

/// Capture logs emitted during the execution of the provided future.
///
/// The future is driven by a current-thread runtime, so every task it
/// awaits inline reports to the capturing subscriber.
pub fn capture_logs_async<T>(f: impl Future<Output = T>) -> (T, Vec<String>) {
    capture_logs(|| {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("failed to build tokio runtime to extract logs the future")
            .block_on(f)
    })
}
