use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use clipboard_rs::ClipboardContext;
use tracing::{debug, debug_span};
use vc_core::ports::SystemClipboardPort;
use vc_core::CapturedText;
use zeroize::Zeroizing;

use super::change_counter::{CounterSourceLock, DigestChangeCounter};
use super::common::CommonClipboardImpl;
use super::platform;

/// System clipboard adapter built on clipboard-rs.
///
/// The change counter comes from the OS where one exists (Windows sequence
/// number, macOS pasteboard change count) and from a keyed content digest
/// elsewhere. The source is fixed by the first counter read.
pub struct LocalClipboard {
    inner: Arc<Mutex<ClipboardContext>>,
    digest: DigestChangeCounter,
    counter_source: CounterSourceLock,
}

impl LocalClipboard {
    pub fn new() -> Result<Self> {
        let context = ClipboardContext::new()
            .map_err(|e| anyhow!("Failed to create clipboard context: {}", e))?;
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
            digest: DigestChangeCounter::new(),
            counter_source: CounterSourceLock::default(),
        })
    }

    fn context(&self) -> Result<MutexGuard<'_, ClipboardContext>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("clipboard context lock poisoned"))
    }

    fn sampled_counter(&self) -> Result<u64> {
        let mut ctx = self.context()?;
        let captured = CommonClipboardImpl::read_text(&mut ctx)?;
        drop(ctx);

        let counter = match &captured {
            Some(CapturedText::Utf8(bytes)) => self.digest.observe(Some(bytes.as_slice())),
            Some(CapturedText::Utf16(units)) => {
                let bytes: Zeroizing<Vec<u8>> =
                    Zeroizing::new(units.iter().flat_map(|u| u.to_le_bytes()).collect());
                self.digest.observe(Some(bytes.as_slice()))
            }
            None => self.digest.observe(None),
        };
        Ok(counter)
    }
}

impl SystemClipboardPort for LocalClipboard {
    fn read_text(&self) -> Result<Option<CapturedText>> {
        let span = debug_span!("platform.clipboard.read_text");
        span.in_scope(|| {
            let mut ctx = self.context()?;
            let captured = CommonClipboardImpl::read_text(&mut ctx)?;
            debug!(has_text = captured.is_some(), "read system clipboard");
            Ok(captured)
        })
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let span = debug_span!("platform.clipboard.write_text", bytes = text.len());
        span.in_scope(|| {
            let mut ctx = self.context()?;
            CommonClipboardImpl::write_text(&mut ctx, text)?;
            debug!("wrote text to system clipboard");
            Ok(())
        })
    }

    fn change_counter(&self) -> Result<u64> {
        self.counter_source
            .read(platform::native_change_count, || self.sampled_counter())
    }
}
