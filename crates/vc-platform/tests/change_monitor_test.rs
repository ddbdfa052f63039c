//! Change monitor behaviour under a paused tokio clock.

use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::Notify;
use vc_core::ports::{ClipboardChangeHandler, SystemClipboardPort};
use vc_core::security::SecretString;
use vc_core::{CapturePolicy, CapturedText};
use vc_platform::{ChangeMonitor, MonitorError, MonitorState};

const POLL: Duration = Duration::from_millis(500);

#[derive(Clone)]
enum Payload {
    Utf8(Vec<u8>),
    Utf16(Vec<u16>),
    NonText,
}

struct FakeState {
    counter: u64,
    payload: Payload,
    failing_counter_reads: usize,
    failing_text_reads: usize,
    written: Vec<String>,
    io_threads: Vec<ThreadId>,
}

struct FakeClipboard {
    state: Mutex<FakeState>,
}

impl FakeClipboard {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FakeState {
                counter: 7,
                payload: Payload::NonText,
                failing_counter_reads: 0,
                failing_text_reads: 0,
                written: Vec::new(),
                io_threads: Vec::new(),
            }),
        })
    }

    fn copy(&self, payload: Payload) {
        let mut state = self.state.lock().unwrap();
        state.counter += 1;
        state.payload = payload;
    }

    fn copy_text(&self, text: &str) {
        self.copy(Payload::Utf8(text.as_bytes().to_vec()));
    }

    fn fail_counter_reads(&self, n: usize) {
        self.state.lock().unwrap().failing_counter_reads = n;
    }

    fn fail_text_reads(&self, n: usize) {
        self.state.lock().unwrap().failing_text_reads = n;
    }

    fn take_io_threads(&self) -> Vec<ThreadId> {
        std::mem::take(&mut self.state.lock().unwrap().io_threads)
    }
}

impl SystemClipboardPort for FakeClipboard {
    fn read_text(&self) -> Result<Option<CapturedText>> {
        let mut state = self.state.lock().unwrap();
        state.io_threads.push(thread::current().id());
        if state.failing_text_reads > 0 {
            state.failing_text_reads -= 1;
            return Err(anyhow!("clipboard busy"));
        }
        Ok(match state.payload.clone() {
            Payload::Utf8(bytes) => Some(CapturedText::Utf8(bytes)),
            Payload::Utf16(units) => Some(CapturedText::Utf16(units)),
            Payload::NonText => None,
        })
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.written.push(text.to_string());
        Ok(())
    }

    fn change_counter(&self) -> Result<u64> {
        let mut state = self.state.lock().unwrap();
        state.io_threads.push(thread::current().id());
        if state.failing_counter_reads > 0 {
            state.failing_counter_reads -= 1;
            return Err(anyhow!("sequence number unavailable"));
        }
        Ok(state.counter)
    }
}

#[derive(Default)]
struct RecordingHandler {
    captured: Mutex<Vec<String>>,
}

impl RecordingHandler {
    fn captured(&self) -> Vec<String> {
        self.captured.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClipboardChangeHandler for RecordingHandler {
    async fn on_text_captured(&self, text: SecretString) {
        self.captured.lock().unwrap().push(text.expose().to_string());
    }
}

fn monitor(clipboard: Arc<FakeClipboard>, handler: Arc<dyn ClipboardChangeHandler>) -> ChangeMonitor {
    ChangeMonitor::new(clipboard, handler, CapturePolicy::default(), POLL)
}

async fn next_poll() {
    tokio::time::sleep(POLL + Duration::from_millis(10)).await;
}

#[tokio::test(start_paused = true)]
async fn each_change_emits_one_event() {
    let clipboard = FakeClipboard::new();
    let handler = Arc::new(RecordingHandler::default());
    let monitor = monitor(clipboard.clone(), handler.clone());
    monitor.start().expect("start");

    clipboard.copy_text("first");
    next_poll().await;
    clipboard.copy_text("second");
    next_poll().await;

    assert_eq!(handler.captured(), vec!["first", "second"]);
    monitor.stop();
}

#[tokio::test(start_paused = true)]
async fn unchanged_counter_emits_nothing() {
    let clipboard = FakeClipboard::new();
    let handler = Arc::new(RecordingHandler::default());
    let monitor = monitor(clipboard.clone(), handler.clone());
    monitor.start().expect("start");

    clipboard.copy_text("once");
    next_poll().await;
    for _ in 0..5 {
        next_poll().await;
    }

    assert_eq!(handler.captured(), vec!["once"]);
}

#[tokio::test(start_paused = true)]
async fn content_present_before_start_is_not_captured() {
    let clipboard = FakeClipboard::new();
    clipboard.copy_text("already there");
    let handler = Arc::new(RecordingHandler::default());
    let monitor = monitor(clipboard.clone(), handler.clone());
    monitor.start().expect("start");

    next_poll().await;
    next_poll().await;

    assert!(handler.captured().is_empty());
}

#[tokio::test(start_paused = true)]
async fn changes_between_polls_collapse_into_one_event() {
    let clipboard = FakeClipboard::new();
    let handler = Arc::new(RecordingHandler::default());
    let monitor = monitor(clipboard.clone(), handler.clone());
    monitor.start().expect("start");

    clipboard.copy_text("a");
    clipboard.copy_text("b");
    clipboard.copy_text("c");
    next_poll().await;

    assert_eq!(handler.captured(), vec!["c"]);
}

#[tokio::test(start_paused = true)]
async fn rejected_payloads_emit_nothing() {
    let clipboard = FakeClipboard::new();
    let handler = Arc::new(RecordingHandler::default());
    let monitor = monitor(clipboard.clone(), handler.clone());
    monitor.start().expect("start");

    clipboard.copy(Payload::Utf8(Vec::new()));
    next_poll().await;
    clipboard.copy(Payload::Utf8(vec![b'x'; 1_000_001]));
    next_poll().await;
    clipboard.copy(Payload::Utf8(vec![0x66, 0xff, 0x6f]));
    next_poll().await;
    clipboard.copy(Payload::Utf16(vec![0x0061, 0xD800]));
    next_poll().await;
    clipboard.copy(Payload::NonText);
    next_poll().await;

    assert!(handler.captured().is_empty());

    clipboard.copy(Payload::Utf16(vec![0xD83E, 0xDD80]));
    next_poll().await;
    assert_eq!(handler.captured(), vec!["🦀"]);
}

#[tokio::test(start_paused = true)]
async fn capture_at_size_limit_is_accepted() {
    let clipboard = FakeClipboard::new();
    let handler = Arc::new(RecordingHandler::default());
    let monitor = monitor(clipboard.clone(), handler.clone());
    monitor.start().expect("start");

    clipboard.copy(Payload::Utf8(vec![b'x'; 1_000_000]));
    next_poll().await;

    let captured = handler.captured();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].len(), 1_000_000);
}

#[tokio::test(start_paused = true)]
async fn stop_halts_polling_and_is_idempotent() {
    let clipboard = FakeClipboard::new();
    let handler = Arc::new(RecordingHandler::default());
    let monitor = monitor(clipboard.clone(), handler.clone());
    monitor.start().expect("start");
    assert_eq!(monitor.state(), MonitorState::Armed);

    monitor.stop();
    monitor.stop();
    assert_eq!(monitor.state(), MonitorState::Idle);

    clipboard.copy_text("after stop");
    tokio::time::sleep(POLL * 4).await;

    assert!(handler.captured().is_empty());
}

#[tokio::test(start_paused = true)]
async fn start_twice_runs_a_single_poller() {
    let clipboard = FakeClipboard::new();
    let handler = Arc::new(RecordingHandler::default());
    let monitor = monitor(clipboard.clone(), handler.clone());
    monitor.start().expect("start");
    monitor.start().expect("second start is a no-op");

    clipboard.copy_text("only once");
    next_poll().await;

    assert_eq!(handler.captured(), vec!["only once"]);
}

#[tokio::test(start_paused = true)]
async fn restart_after_stop_rearms() {
    let clipboard = FakeClipboard::new();
    let handler = Arc::new(RecordingHandler::default());
    let monitor = monitor(clipboard.clone(), handler.clone());
    monitor.start().expect("start");
    monitor.stop();

    clipboard.copy_text("while idle");
    monitor.start().expect("restart");
    clipboard.copy_text("after restart");
    next_poll().await;

    assert_eq!(handler.captured(), vec!["after restart"]);
    assert_eq!(monitor.state(), MonitorState::Armed);
}

#[tokio::test(start_paused = true)]
async fn read_failures_do_not_stop_the_loop() {
    let clipboard = FakeClipboard::new();
    let handler = Arc::new(RecordingHandler::default());
    let monitor = monitor(clipboard.clone(), handler.clone());
    monitor.start().expect("start");

    clipboard.fail_counter_reads(2);
    clipboard.copy_text("eventually");
    next_poll().await;
    next_poll().await;
    assert!(handler.captured().is_empty());

    next_poll().await;
    assert_eq!(handler.captured(), vec!["eventually"]);

    clipboard.fail_text_reads(1);
    clipboard.copy_text("retried");
    next_poll().await;
    assert_eq!(handler.captured().len(), 1);
    next_poll().await;
    assert_eq!(handler.captured(), vec!["eventually", "retried"]);
    assert_eq!(monitor.state(), MonitorState::Armed);
}

#[tokio::test(start_paused = true)]
async fn start_fails_when_counter_is_unreadable() {
    let clipboard = FakeClipboard::new();
    clipboard.fail_counter_reads(1);
    let monitor = monitor(clipboard, Arc::new(RecordingHandler::default()));

    let err = monitor.start().expect_err("expected Clipboard error");
    assert!(matches!(err, MonitorError::Clipboard(_)));
    assert_eq!(monitor.state(), MonitorState::Idle);
}

#[test]
fn start_outside_runtime_is_rejected() {
    let monitor = monitor(FakeClipboard::new(), Arc::new(RecordingHandler::default()));
    assert!(matches!(monitor.start(), Err(MonitorError::NoRuntime)));
}

/// Blocks inside the handler until released.
struct GatedHandler {
    entered: Notify,
    release: Notify,
    captured: Mutex<Vec<String>>,
}

#[async_trait]
impl ClipboardChangeHandler for GatedHandler {
    async fn on_text_captured(&self, text: SecretString) {
        self.entered.notify_one();
        self.release.notified().await;
        self.captured.lock().unwrap().push(text.expose().to_string());
    }
}

#[tokio::test(start_paused = true)]
async fn in_flight_tick_finishes_after_stop() {
    let clipboard = FakeClipboard::new();
    let handler = Arc::new(GatedHandler {
        entered: Notify::new(),
        release: Notify::new(),
        captured: Mutex::new(Vec::new()),
    });
    let monitor = monitor(clipboard.clone(), handler.clone());
    monitor.start().expect("start");

    clipboard.copy_text("in flight");
    handler.entered.notified().await;

    monitor.stop();
    handler.release.notify_one();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(*handler.captured.lock().unwrap(), vec!["in flight"]);

    clipboard.copy_text("too late");
    tokio::time::sleep(POLL * 4).await;
    assert_eq!(handler.captured.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn clipboard_reads_run_off_the_runtime_thread() {
    let clipboard = FakeClipboard::new();
    let handler = Arc::new(RecordingHandler::default());
    let monitor = monitor(clipboard.clone(), handler.clone());
    monitor.start().expect("start");
    // The baseline read in `start` is synchronous.
    clipboard.take_io_threads();

    clipboard.copy_text("polled");
    next_poll().await;

    assert_eq!(handler.captured(), vec!["polled"]);
    let runtime_thread = thread::current().id();
    let io_threads = clipboard.take_io_threads();
    assert_eq!(io_threads.len(), 2, "one counter read and one text read");
    assert!(io_threads.iter().all(|id| *id != runtime_thread));
    monitor.stop();
}
