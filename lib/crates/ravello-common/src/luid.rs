//! Locally-unique identifiers (LUIDs).
//!
//! Every sub-document of a design (VM, hard drive, network interface, ...)
//! carries an integer `id` that must be unique within the design. Other
//! sub-documents point at it through fields named `...Id` (single reference)
//! or `...Ids` (list of references). Copying a VM into a design therefore
//! means issuing new identifiers and repointing the copy's references at them.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand::rngs::ThreadRng;

use crate::document::{Document, Value};

/// Field holding a sub-document's own identifier.
pub const LUID_FIELD: &str = "id";

/// Old identifier → replacement issued by [`regenerate_luids`].
pub type LuidMap = HashMap<i64, i64>;

/// Collect every integer `id` field anywhere inside `doc`.
#[must_use]
pub fn collect_luids(doc: &Document) -> HashSet<i64> {
    let mut luids = HashSet::new();
    visit_document(doc, &mut |luid| {
        luids.insert(luid);
    });
    luids
}

/// Distinct identifiers of `doc` in the order they first appear.
fn ordered_luids(doc: &Document) -> Vec<i64> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    visit_document(doc, &mut |luid| {
        if seen.insert(luid) {
            ordered.push(luid);
        }
    });
    ordered
}

fn visit_document(doc: &Document, visit: &mut impl FnMut(i64)) {
    for (key, value) in doc.iter() {
        if key == LUID_FIELD
            && let Value::Integer(luid) = value
        {
            visit(*luid);
        }
        visit_value(value, visit);
    }
}

fn visit_value(value: &Value, visit: &mut impl FnMut(i64)) {
    match value {
        Value::Document(doc) => visit_document(doc, visit),
        Value::Sequence(items) => {
            for item in items {
                visit_value(item, visit);
            }
        }
        _ => {}
    }
}

/// Issues identifiers that do not collide with any identifier already in use.
pub struct LuidAllocator<R = ThreadRng> {
    in_use: HashSet<i64>,
    rng: R,
}

impl LuidAllocator<ThreadRng> {
    /// Allocator drawing from the thread-local RNG.
    #[must_use]
    pub fn new(in_use: HashSet<i64>) -> Self {
        Self::with_rng(in_use, rand::rng())
    }
}

impl<R: Rng> LuidAllocator<R> {
    pub fn with_rng(in_use: HashSet<i64>, rng: R) -> Self {
        Self { in_use, rng }
    }

    /// A positive identifier not yet in use. The returned value is recorded.
    pub fn fresh(&mut self) -> i64 {
        loop {
            let candidate = self.rng.random_range(1..=i64::MAX);
            if self.in_use.insert(candidate) {
                return candidate;
            }
        }
    }

    /// Mark identifiers as taken without issuing them.
    pub fn reserve(&mut self, luids: impl IntoIterator<Item = i64>) {
        self.in_use.extend(luids);
    }

    #[must_use]
    pub fn in_use(&self) -> &HashSet<i64> {
        &self.in_use
    }
}

/// Give every identifier inside `doc` a fresh value and rewrite the
/// references inside `doc` that pointed at the old values.
///
/// References to identifiers outside `doc` (for example a VM's `baseVmId`
/// pointing at the image it was created from) are left as they are. So are
/// references to `doc`'s own top-level `id`: a document copied from an image
/// carries the image's id, and fields pointing at that value name the image,
/// not the copy.
pub fn regenerate_luids<R: Rng>(doc: &mut Document, allocator: &mut LuidAllocator<R>) -> LuidMap {
    let mapping: LuidMap = ordered_luids(doc)
        .into_iter()
        .map(|old| (old, allocator.fresh()))
        .collect();

    let mut references = mapping.clone();
    if let Some(root) = doc.get(LUID_FIELD).and_then(Value::as_i64) {
        references.remove(&root);
    }

    rewrite_document(doc, &mapping, &references);
    mapping
}

fn is_reference(key: &str) -> bool {
    key.ends_with("Id")
}

fn is_reference_list(key: &str) -> bool {
    key.ends_with("Ids")
}

fn rewrite_document(doc: &mut Document, ids: &LuidMap, references: &LuidMap) {
    for (key, value) in doc.iter_mut() {
        match value {
            Value::Integer(luid) if key == LUID_FIELD => replace(luid, ids),
            Value::Integer(luid) if is_reference(key) => replace(luid, references),
            Value::Sequence(items) if is_reference_list(key) => {
                for item in items.iter_mut() {
                    match item {
                        Value::Integer(luid) => replace(luid, references),
                        other => rewrite_value(other, ids, references),
                    }
                }
            }
            other => rewrite_value(other, ids, references),
        }
    }
}

fn rewrite_value(value: &mut Value, ids: &LuidMap, references: &LuidMap) {
    match value {
        Value::Document(doc) => rewrite_document(doc, ids, references),
        Value::Sequence(items) => {
            for item in items {
                rewrite_value(item, ids, references);
            }
        }
        _ => {}
    }
}

fn replace(luid: &mut i64, mapping: &LuidMap) {
    if let Some(new) = mapping.get(&*luid) {
        *luid = *new;
    }
}
