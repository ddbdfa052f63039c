//! Content-digest change counter for platforms without a native one, and
//! the choice between the two.

use std::sync::{Mutex, OnceLock};

use anyhow::{anyhow, Result};
use rand::{rngs::OsRng, TryRngCore};
use tracing::debug;

/// Where a clipboard's change counter comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CounterSource {
    Native,
    Digest,
}

/// Picks the counter source on first use and keeps it.
///
/// Native and digest counters number changes differently, so once one is
/// chosen a missing native count is an error rather than a digest value.
#[derive(Debug, Default)]
pub(crate) struct CounterSourceLock {
    source: OnceLock<CounterSource>,
}

impl CounterSourceLock {
    pub(crate) fn read(
        &self,
        native: impl Fn() -> Option<u64>,
        sampled: impl FnOnce() -> Result<u64>,
    ) -> Result<u64> {
        let source = *self.source.get_or_init(|| {
            let source = if native().is_some() {
                CounterSource::Native
            } else {
                CounterSource::Digest
            };
            debug!(?source, "clipboard change counter source selected");
            source
        });

        match source {
            CounterSource::Native => {
                native().ok_or_else(|| anyhow!("native clipboard change counter unavailable"))
            }
            CounterSource::Digest => sampled(),
        }
    }

    #[cfg(test)]
    pub(crate) fn source(&self) -> Option<CounterSource> {
        self.source.get().copied()
    }
}

/// Synthesises a change counter by comparing keyed digests of successive
/// clipboard samples.
///
/// The digest key is random per process, so the stored hash cannot be
/// matched against guessed clipboard content.
pub struct DigestChangeCounter {
    key: [u8; 32],
    state: Mutex<DigestState>,
}

#[derive(Default)]
struct DigestState {
    last: Option<blake3::Hash>,
    counter: u64,
    primed: bool,
}

impl DigestChangeCounter {
    pub fn new() -> Self {
        let mut key = [0u8; 32];
        // A zero key still detects changes; it only loses the keyed property.
        if OsRng.try_fill_bytes(&mut key).is_err() {
            tracing::warn!("OS random source unavailable; change digest is unkeyed");
        }
        Self {
            key,
            state: Mutex::new(DigestState::default()),
        }
    }

    /// Feed the current clipboard text (or `None` for a non-text payload)
    /// and get back the counter. The counter moves only when the sample
    /// differs from the previous one.
    pub fn observe(&self, sample: Option<&[u8]>) -> u64 {
        let digest = sample.map(|bytes| blake3::keyed_hash(&self.key, bytes));
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if !state.primed {
            state.primed = true;
            state.last = digest;
            return state.counter;
        }
        if state.last != digest {
            state.last = digest;
            state.counter = state.counter.wrapping_add(1);
        }
        state.counter
    }
}

impl Default for DigestChangeCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DigestChangeCounter {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.key.zeroize();
    }
}
