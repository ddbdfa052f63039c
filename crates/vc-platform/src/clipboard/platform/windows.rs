use winapi::um::winuser::GetClipboardSequenceNumber;

/// `GetClipboardSequenceNumber` returns 0 when the process has no access to
/// the window station; treat that as "no native counter".
pub(super) fn sequence_number() -> Option<u64> {
    let seq = unsafe { GetClipboardSequenceNumber() };
    if seq == 0 {
        None
    } else {
        Some(u64::from(seq))
    }
}
