//! Infrastructure implementation of the `IdentifierRewriter` port.

use std::collections::HashSet;

use anyhow::Result;
use rand::Rng;
use rand::rngs::ThreadRng;
use ravello_common::{Document, LuidAllocator, collect_luids, regenerate_luids};

use crate::application::ports::IdentifierRewriter;

/// Issues random LUIDs that avoid every identifier already reserved.
pub struct LuidRewriter<R = ThreadRng> {
    allocator: LuidAllocator<R>,
}

impl LuidRewriter<ThreadRng> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            allocator: LuidAllocator::new(HashSet::new()),
        }
    }
}

impl Default for LuidRewriter<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> LuidRewriter<R> {
    /// Rewriter drawing identifiers from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            allocator: LuidAllocator::with_rng(HashSet::new(), rng),
        }
    }
}

impl<R: Rng> IdentifierRewriter for LuidRewriter<R> {
    fn reserve(&mut self, existing: &Document) {
        self.allocator.reserve(collect_luids(existing));
        tracing::debug!(reserved = self.allocator.in_use().len(), "reserved existing identifiers");
    }

    fn regenerate_identifiers(&mut self, subtree: &mut Document) -> Result<()> {
        let mapping = regenerate_luids(subtree, &mut self.allocator);
        tracing::debug!(rewritten = mapping.len(), "regenerated identifiers");
        Ok(())
    }
}
