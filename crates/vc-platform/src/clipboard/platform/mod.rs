//! Native clipboard change counters.

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

/// The OS clipboard change count, when the platform keeps one.
///
/// `None` means the caller has to fall back to content sampling.
pub fn native_change_count() -> Option<u64> {
    #[cfg(target_os = "windows")]
    {
        windows::sequence_number()
    }
    #[cfg(target_os = "macos")]
    {
        macos::change_count()
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        None
    }
}
