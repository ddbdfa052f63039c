use objc::runtime::Object;
use objc::{class, msg_send, sel, sel_impl};

/// `[[NSPasteboard generalPasteboard] changeCount]`
pub(super) fn change_count() -> Option<u64> {
    unsafe {
        let pasteboard: *mut Object = msg_send![class!(NSPasteboard), generalPasteboard];
        if pasteboard.is_null() {
            return None;
        }
        let count: isize = msg_send![pasteboard, changeCount];
        Some(count as u64)
    }
}
