use anyhow::{anyhow, Result};
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat};
use vc_core::CapturedText;

pub(crate) struct CommonClipboardImpl;

fn map_clipboard_err<T>(
    result: std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T> {
    result.map_err(|e| anyhow!(e))
}

impl CommonClipboardImpl {
    /// Text payload of the clipboard, or `None` when it holds something else.
    pub fn read_text(ctx: &mut ClipboardContext) -> Result<Option<CapturedText>> {
        if !ctx.has(ContentFormat::Text) {
            return Ok(None);
        }
        let text = map_clipboard_err(ctx.get_text())?;
        Ok(Some(CapturedText::from(text)))
    }

    pub fn write_text(ctx: &mut ClipboardContext, text: &str) -> Result<()> {
        map_clipboard_err(ctx.set_text(text.to_owned()))
    }
}
