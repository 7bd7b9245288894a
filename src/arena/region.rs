use crate::foundation::error::{InkError, InkResult};
use std::marker::PhantomData;

/// Handle to a contiguous run of elements inside a [`Region`].
///
/// Spans carry the region generation they were allocated in; resolving a span after the region
/// was reset trips a debug assertion.
pub struct Span<T> {
    start: u32,
    len: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Span<T> {
    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    fn range(&self) -> std::ops::Range<usize> {
        let start = self.start as usize;
        start..start + self.len as usize
    }
}

impl<T> Clone for Span<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Span<T> {}

impl<T> std::fmt::Debug for Span<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Span")
            .field("start", &self.start)
            .field("len", &self.len)
            .field("generation", &self.generation)
            .finish()
    }
}

/// Rewind point for stack-discipline scratch use, see [`Region::mark`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark {
    len: usize,
    generation: u32,
}

/// Usage snapshot of one region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RegionStats {
    /// Elements currently allocated.
    pub used: usize,
    /// Maximum number of elements.
    pub capacity: usize,
    /// High-water mark since creation.
    pub peak: usize,
    /// Number of resets so far.
    pub resets: u32,
}

/// Bounded bump allocator for `Copy` elements.
///
/// Backing storage grows on demand up to `capacity` elements; exceeding it is reported as
/// [`InkError::Capacity`] and leaves the region unchanged.
pub struct Region<T> {
    name: &'static str,
    items: Vec<T>,
    capacity: usize,
    generation: u32,
    peak: usize,
}

impl<T: Copy> Region<T> {
    pub(crate) fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            items: Vec::new(),
            capacity: capacity.min(u32::MAX as usize),
            generation: 0,
            peak: 0,
        }
    }

    /// Copy `src` into the region.
    pub(crate) fn alloc_slice(&mut self, src: &[T]) -> InkResult<Span<T>> {
        let start = self.items.len();
        if src.len() > self.capacity - start {
            return Err(self.exhausted(src.len()));
        }
        self.items.extend_from_slice(src);
        Ok(self.finish_alloc(start))
    }

    /// Append every element yielded by `iter`.
    ///
    /// On overflow the partial allocation is rolled back.
    pub(crate) fn alloc_iter(&mut self, iter: impl IntoIterator<Item = T>) -> InkResult<Span<T>> {
        let start = self.items.len();
        for item in iter {
            if self.items.len() == self.capacity {
                let wanted = self.items.len() - start + 1;
                self.items.truncate(start);
                return Err(self.exhausted(wanted));
            }
            self.items.push(item);
        }
        Ok(self.finish_alloc(start))
    }

    /// Resolve a span allocated from this region.
    pub(crate) fn get(&self, span: Span<T>) -> &[T] {
        debug_assert_eq!(
            span.generation, self.generation,
            "stale span resolved in {} region",
            self.name
        );
        &self.items[span.range()]
    }

    /// Drop everything and invalidate outstanding spans.
    pub(crate) fn reset(&mut self) {
        self.items.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Record the current top so scratch data can be released with [`Region::rewind`].
    pub(crate) fn mark(&self) -> Mark {
        Mark {
            len: self.items.len(),
            generation: self.generation,
        }
    }

    /// Release everything allocated after `mark`.
    pub(crate) fn rewind(&mut self, mark: Mark) {
        debug_assert_eq!(mark.generation, self.generation, "rewind across a reset");
        self.items.truncate(mark.len);
    }

    pub(crate) fn stats(&self) -> RegionStats {
        RegionStats {
            used: self.items.len(),
            capacity: self.capacity,
            peak: self.peak,
            resets: self.generation,
        }
    }

    fn finish_alloc(&mut self, start: usize) -> Span<T> {
        self.peak = self.peak.max(self.items.len());
        Span {
            start: start as u32,
            len: (self.items.len() - start) as u32,
            generation: self.generation,
            _marker: PhantomData,
        }
    }

    fn exhausted(&self, wanted: usize) -> InkError {
        InkError::capacity(format!(
            "{} region exhausted: {} of {} used, {} more requested",
            self.name,
            self.items.len(),
            self.capacity,
            wanted
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/arena/region.rs"]
mod tests;
