//! Checked size arithmetic and growable scratch buffers.
//!
//! Every capacity used by the tokenizer is computed through [`checked_capacity`]
//! so that an oversized input trips a [`TokenizerError::SizeOverflow`] before any
//! multiplication can wrap. Allocation itself is fallible and reported as
//! [`TokenizerError::OutOfMemory`].

use std::mem;

use crate::error::{Result, TokenizerError};

/// Largest allocation, in bytes, the platform allows for a single buffer.
pub const MAX_ALLOCATION_BYTES: usize = isize::MAX as usize;

/// Compute `len * ratio + extra` elements of `T`, refusing anything whose byte
/// size would exceed [`MAX_ALLOCATION_BYTES`].
///
/// The bounds are checked before each multiplication and addition.
pub fn checked_capacity<T>(len: usize, ratio: usize, extra: usize, what: &'static str) -> Result<usize> {
    let elements = len
        .checked_mul(ratio)
        .and_then(|n| n.checked_add(extra))
        .ok_or(TokenizerError::size_overflow(what))?;
    byte_size::<T>(elements, what)?;
    Ok(elements)
}

/// Byte size of `elements` values of `T`, checked against the platform limit.
pub fn byte_size<T>(elements: usize, what: &'static str) -> Result<usize> {
    let elem = mem::size_of::<T>().max(1);
    if elements > MAX_ALLOCATION_BYTES / elem {
        return Err(TokenizerError::size_overflow(what));
    }
    Ok(elements * elem)
}

/// Reserve room for `additional` more elements, mapping failure to `OutOfMemory`.
pub fn try_reserve<T>(vec: &mut Vec<T>, additional: usize, what: &'static str) -> Result<()> {
    let requested = byte_size::<T>(additional, what)?;
    vec.try_reserve_exact(additional)
        .map_err(|_| TokenizerError::OutOfMemory { requested })
}

/// A zero-initialized working buffer that only ever grows.
///
/// The usable capacity is the initialized length of the inner vector, so a
/// capability can be handed a `&mut [T]` whose length is the capacity it may
/// write into. Growth is geometric: the buffer at least doubles each time.
#[derive(Debug)]
pub struct ScratchBuffer<T> {
    data: Vec<T>,
    growths: usize,
    what: &'static str,
}

impl<T: Copy + Default> ScratchBuffer<T> {
    /// Create a buffer with `initial` usable elements.
    pub fn with_capacity(initial: usize, what: &'static str) -> Result<Self> {
        let mut data = Vec::new();
        if initial > 0 {
            try_reserve(&mut data, initial, what)?;
            data.resize(initial, T::default());
        }
        Ok(ScratchBuffer {
            data,
            growths: 0,
            what,
        })
    }

    /// Current usable capacity in elements.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of times the buffer had to be enlarged.
    pub fn growths(&self) -> usize {
        self.growths
    }

    /// Make sure at least `required` elements are usable.
    ///
    /// The new capacity is `max(required, 2 * capacity)`, falling back to
    /// `required` when doubling would pass the platform limit.
    pub fn ensure_capacity(&mut self, required: usize) -> Result<()> {
        let current = self.data.len();
        if required <= current {
            return Ok(());
        }
        byte_size::<T>(required, self.what)?;

        let doubled = current.saturating_mul(2);
        let target = if doubled > required && byte_size::<T>(doubled, self.what).is_ok() {
            doubled
        } else {
            required
        };

        try_reserve(&mut self.data, target - current, self.what)?;
        self.data.resize(target, T::default());
        self.growths += 1;
        Ok(())
    }

    /// The whole usable region.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Read-only view of the first `len` elements, clamped to the capacity.
    pub fn prefix(&self, len: usize) -> &[T] {
        &self.data[..len.min(self.data.len())]
    }
}
