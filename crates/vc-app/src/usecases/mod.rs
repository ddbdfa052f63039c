mod capture_clipboard_text;

pub use capture_clipboard_text::CaptureClipboardText;
