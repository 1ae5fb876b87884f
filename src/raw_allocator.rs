//! The constant-time allocation engine.
//!
//! [`RawAllocator`] owns a single inline byte buffer (the arena) and
//! services allocation, deallocation and in-place resize requests in time
//! bounded by a small constant, independent of the arena size, the number
//! of live allocations or the fragmentation pattern.
//!
//! # Layout
//! Every fragment, free or used, begins with a two-word header:
//! - `next`: the byte offset of the next fragment in address order, or `0`
//!   if this is the last fragment. `0` can never be a real `next` value,
//!   since a fragment's successor always lies at a strictly larger offset
//!   than the fragment itself, and the only fragment ever located at
//!   offset `0` is the first one.
//! - `prev_used`: the byte offset of the previous fragment in address
//!   order with the low bit repurposed as the used-flag. All fragment
//!   offsets are multiples of [`A`], so the low bit of a real offset is
//!   always clear and free for this encoding. The fragment at offset `0`
//!   has no predecessor; for that one fragment the upper bits of this word
//!   are meaningless and are never read as a previous-offset.
//!
//! Free fragments additionally store a doubly-linked free-list entry
//! (`next_free`, `prev_free`) in the two words immediately following the
//! header; these bytes are only meaningful while the fragment is free and
//! are overwritten by the caller's data once the fragment is allocated.
//!
//! A fragment's size is never stored directly: it is `next - self`, or
//! `arena_end - self` for the last fragment. This keeps every split and
//! merge a pointer-only operation.
use core::mem::size_of;
use core::ptr::NonNull;

/// Bytes in a machine word; the unit the allocator's alignment is derived
/// from.
const WORD: usize = size_of::<usize>();

/// Natural alignment of every fragment address and returned payload
/// pointer: twice the machine word size.
pub const A: usize = 2 * WORD;

/// Smallest possible fragment size: a header plus minimal free-list links.
pub const FMIN: usize = 2 * A;

/// Largest possible fragment size.
const FMAX: usize = 1 << (usize::BITS - 1);

/// Number of size-class bins, one per bit of the mask word.
const BINS: usize = usize::BITS as usize;

/// Sentinel marking the end of a bin's free list.
const NULL_FREE: usize = usize::MAX;

/// The minimum arena size accepted by [`RawAllocator::new`] on this
/// platform. Exported so callers can size their const-generic parameter
/// correctly.
pub const MIN_ARENA_SIZE: usize = FMIN;

/// Snapshot of the allocator's bookkeeping counters.
///
/// Returned by value from [`RawAllocator::diagnostics`]; reading it never
/// mutates the allocator and never fails.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    /// Total bytes governed by fragments (excludes per-fragment headers'
    /// contribution to overhead only in the sense that it is the sum of
    /// usable arena space, not the raw buffer length).
    pub capacity: usize,
    /// Bytes currently handed out to the caller, header included.
    pub allocated: usize,
    /// High-water mark of `allocated` across the allocator's lifetime.
    pub peak_allocated: usize,
    /// Largest `amount` ever passed to [`RawAllocator::alloc`] or
    /// [`RawAllocator::reallocate`].
    pub peak_request_size: usize,
    /// Number of allocation requests that failed for lack of a suitable
    /// free fragment.
    pub oom_count: usize,
}

/// Reasons [`RawAllocator::free`] can reject a pointer at debug time.
///
/// None of these are guaranteed to be detected outside of the checks this
/// type documents: freeing a pointer the allocator never returned is
/// undefined behavior, exactly as for any other allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeError {
    /// The pointer is not a multiple of [`A`] bytes past the arena base.
    NotAligned,
    /// The pointer does not lie within the arena.
    OutOfRange,
    /// The fragment at this pointer is already free.
    DoubleFree,
}

fn round_up_pow2(x: usize) -> usize {
    if x <= 1 {
        1
    } else {
        1usize << (usize::BITS - (x - 1).leading_zeros())
    }
}

fn floor_log2(x: usize) -> u32 {
    usize::BITS - 1 - x.leading_zeros()
}

fn bin_index_for_size(size: usize) -> usize {
    floor_log2(size / FMIN) as usize
}

fn read_usize(buf: &[u8], at: usize) -> usize {
    usize::from_ne_bytes(buf[at..at + WORD].try_into().unwrap())
}

fn write_usize(buf: &mut [u8], at: usize, value: usize) {
    buf[at..at + WORD].copy_from_slice(&value.to_ne_bytes());
}

fn next_of(buf: &[u8], off: usize) -> usize {
    read_usize(buf, off)
}

fn set_next(buf: &mut [u8], off: usize, next: usize) {
    write_usize(buf, off, next);
}

fn prev_used_word(buf: &[u8], off: usize) -> usize {
    read_usize(buf, off + WORD)
}

fn set_prev_used_word(buf: &mut [u8], off: usize, word: usize) {
    write_usize(buf, off + WORD, word);
}

fn is_used(buf: &[u8], off: usize) -> bool {
    prev_used_word(buf, off) & 1 == 1
}

fn set_used(buf: &mut [u8], off: usize, used: bool) {
    let bits = prev_used_word(buf, off) & !1;
    set_prev_used_word(buf, off, bits | used as usize);
}

/// Sets the previous-offset bits while preserving the used-flag.
fn set_prev_bits(buf: &mut [u8], off: usize, prev: usize) {
    let used = is_used(buf, off);
    set_prev_used_word(buf, off, prev | used as usize);
}

/// `None` for the fragment at offset `0`, which has no predecessor.
fn prev_addr(buf: &[u8], off: usize) -> Option<usize> {
    if off == 0 {
        None
    } else {
        Some(prev_used_word(buf, off) & !1)
    }
}

/// `None` if this is the last fragment.
fn next_addr(buf: &[u8], off: usize) -> Option<usize> {
    let next = next_of(buf, off);
    if next == 0 {
        None
    } else {
        Some(next)
    }
}

fn size_of_fragment(buf: &[u8], off: usize, arena_end: usize) -> usize {
    let next = next_of(buf, off);
    if next == 0 {
        arena_end - off
    } else {
        next - off
    }
}

fn next_free_of(buf: &[u8], off: usize) -> usize {
    read_usize(buf, off + A)
}

fn set_next_free(buf: &mut [u8], off: usize, value: usize) {
    write_usize(buf, off + A, value);
}

fn prev_free_of(buf: &[u8], off: usize) -> usize {
    read_usize(buf, off + A + WORD)
}

fn set_prev_free(buf: &mut [u8], off: usize, value: usize) {
    write_usize(buf, off + A + WORD, value);
}

/// The engine. `N` is the total size in bytes of the inline arena; it is
/// the allocator's only configuration knob, in the same spirit as the
/// const-generic heap size of the teacher crate this one descends from.
///
/// All fields are zero in the value returned by [`RawAllocator::new`], so
/// that a `static ALLOCATOR: RawAllocator<N> = RawAllocator::new();`
/// lands entirely in `.bss` rather than `.data` — the actual arena layout
/// (the single root fragment spanning the whole capacity, its bin and
/// mask bit) is only written the first time the allocator is touched. See
/// [`RawAllocator::ensure_init`].
#[repr(align(16))]
pub struct RawAllocator<const N: usize> {
    buffer: [u8; N],
    bins: [usize; BINS],
    mask: usize,
    capacity: usize,
    arena_end: usize,
    diagnostics: Diagnostics,
}

impl<const N: usize> RawAllocator<N> {
    /// Creates a new, not-yet-initialized allocator.
    ///
    /// # Panics
    /// Panics if `N` is smaller than [`MIN_ARENA_SIZE`] for this platform.
    #[must_use = "assign the allocator to a static variable and apply the `#[global_allocator]`-attribute to make it the global allocator"]
    pub const fn new() -> Self {
        assert!(
            N >= MIN_ARENA_SIZE,
            "too small heap memory: arena must be at least MIN_ARENA_SIZE bytes"
        );
        Self {
            buffer: [0; N],
            bins: [0; BINS],
            mask: 0,
            capacity: 0,
            arena_end: 0,
            diagnostics: Diagnostics {
                capacity: 0,
                allocated: 0,
                peak_allocated: 0,
                peak_request_size: 0,
                oom_count: 0,
            },
        }
    }

    /// Lays out the single root fragment the first time the allocator is
    /// actually used. `capacity` is `0` only in this not-yet-initialized
    /// state, since a real capacity is always at least [`FMIN`].
    fn ensure_init(&mut self) {
        if self.capacity != 0 {
            return;
        }
        let capacity = {
            let clamped = if N < FMAX { N } else { FMAX };
            clamped & !(FMIN - 1)
        };
        self.capacity = capacity;
        self.arena_end = capacity;
        self.diagnostics.capacity = capacity;

        set_next(&mut self.buffer, 0, 0);
        set_prev_used_word(&mut self.buffer, 0, 0);
        set_next_free(&mut self.buffer, 0, NULL_FREE);
        set_prev_free(&mut self.buffer, 0, NULL_FREE);

        let bin = bin_index_for_size(capacity);
        self.bins[bin] = 0;
        self.mask |= 1 << bin;
    }

    fn insert_free(&mut self, off: usize, size: usize) {
        let bin = bin_index_for_size(size);
        let was_empty = (self.mask >> bin) & 1 == 0;
        if was_empty {
            set_next_free(&mut self.buffer, off, NULL_FREE);
            self.bins[bin] = off;
            self.mask |= 1 << bin;
        } else {
            let head = self.bins[bin];
            set_next_free(&mut self.buffer, off, head);
            set_prev_free(&mut self.buffer, head, off);
            self.bins[bin] = off;
        }
        set_prev_free(&mut self.buffer, off, NULL_FREE);
    }

    fn unbin(&mut self, off: usize, size: usize) {
        let bin = bin_index_for_size(size);
        let prev = prev_free_of(&self.buffer, off);
        let next = next_free_of(&self.buffer, off);
        if prev == NULL_FREE {
            self.bins[bin] = if next == NULL_FREE { 0 } else { next };
            if next == NULL_FREE {
                self.mask &= !(1 << bin);
            } else {
                set_prev_free(&mut self.buffer, next, NULL_FREE);
            }
        } else {
            set_next_free(&mut self.buffer, prev, next);
            if next != NULL_FREE {
                set_prev_free(&mut self.buffer, next, prev);
            }
        }
    }

    fn offset_of(&self, ptr: NonNull<u8>) -> usize {
        ptr.as_ptr() as usize - self.buffer.as_ptr() as usize
    }

    /// Allocates `amount` bytes, returning an [`A`]-aligned payload
    /// pointer, or `None` on failure. Runs in constant time.
    ///
    /// Requesting zero bytes is not an error: it returns `None` without
    /// touching the OOM counter.
    pub fn alloc(&mut self, amount: usize) -> Option<NonNull<u8>> {
        self.ensure_init();
        if amount == 0 {
            return None;
        }
        self.diagnostics.peak_request_size = self.diagnostics.peak_request_size.max(amount);
        if amount > self.capacity - A {
            self.diagnostics.oom_count += 1;
            return None;
        }

        let need = round_up_pow2(amount + A).max(FMIN);
        let min_bin = bin_index_for_size(need);
        let candidate_mask = self.mask & !((1usize << min_bin) - 1);
        if candidate_mask == 0 {
            self.diagnostics.oom_count += 1;
            return None;
        }
        // Isolate the lowest set bit without relying on signed negation.
        let lowest_bit = candidate_mask & candidate_mask.wrapping_neg();
        let chosen_bin = floor_log2(lowest_bit) as usize;

        let off = self.bins[chosen_bin];
        let size = size_of_fragment(&self.buffer, off, self.arena_end);
        self.unbin(off, size);

        let leftover = size - need;
        if leftover >= FMIN {
            let new_off = off + need;
            let old_next = next_of(&self.buffer, off);
            set_next(&mut self.buffer, new_off, old_next);
            set_prev_used_word(&mut self.buffer, new_off, off);
            if old_next != 0 {
                set_prev_bits(&mut self.buffer, old_next, new_off);
            }
            set_next(&mut self.buffer, off, new_off);
            self.insert_free(new_off, leftover);
        }

        set_used(&mut self.buffer, off, true);
        self.diagnostics.allocated += need;
        self.diagnostics.peak_allocated =
            self.diagnostics.peak_allocated.max(self.diagnostics.allocated);

        // SAFETY: `off + A` is within the buffer because `off + need <=
        // off + size <= capacity <= N`, and `need >= A`.
        let payload = unsafe { self.buffer.as_mut_ptr().add(off + A) };
        NonNull::new(payload)
    }

    /// Frees a pointer previously returned by this allocator. `None` is a
    /// documented no-op. Runs in constant time.
    ///
    /// At debug time, an allocator-foreign pointer is rejected rather than
    /// corrupting the heap; in release builds the checks still run (they
    /// are cheap and O(1)) but callers should not rely on them catching
    /// every misuse, per this crate's overall safety contract.
    pub fn free(&mut self, ptr: Option<NonNull<u8>>) -> Result<(), FreeError> {
        self.ensure_init();
        let Some(ptr) = ptr else {
            return Ok(());
        };
        let base = self.buffer.as_ptr() as usize;
        let addr = ptr.as_ptr() as usize;
        if addr < base + A || addr >= base + self.arena_end {
            return Err(FreeError::OutOfRange);
        }
        let rel = addr - base;
        if rel % A != 0 {
            return Err(FreeError::NotAligned);
        }
        let off = rel - A;
        if !is_used(&self.buffer, off) {
            return Err(FreeError::DoubleFree);
        }
        self.free_at(off);
        Ok(())
    }

    fn free_at(&mut self, off: usize) {
        let size = size_of_fragment(&self.buffer, off, self.arena_end);
        set_used(&mut self.buffer, off, false);
        self.diagnostics.allocated -= size;

        let prev = prev_addr(&self.buffer, off);
        let next = next_addr(&self.buffer, off);
        let prev_free = prev.map_or(false, |p| !is_used(&self.buffer, p));
        let next_free = next.map_or(false, |n| !is_used(&self.buffer, n));

        match (prev_free, next_free) {
            (true, true) => {
                let p = prev.unwrap();
                let q = next.unwrap();
                let p_size = size_of_fragment(&self.buffer, p, self.arena_end);
                let q_size = size_of_fragment(&self.buffer, q, self.arena_end);
                self.unbin(p, p_size);
                self.unbin(q, q_size);
                let q_next = next_of(&self.buffer, q);
                set_next(&mut self.buffer, p, q_next);
                if q_next != 0 {
                    set_prev_bits(&mut self.buffer, q_next, p);
                }
                self.insert_free(p, p_size + size + q_size);
            }
            (true, false) => {
                let p = prev.unwrap();
                let p_size = size_of_fragment(&self.buffer, p, self.arena_end);
                self.unbin(p, p_size);
                let f_next = next_of(&self.buffer, off);
                set_next(&mut self.buffer, p, f_next);
                if f_next != 0 {
                    set_prev_bits(&mut self.buffer, f_next, p);
                }
                self.insert_free(p, p_size + size);
            }
            (false, true) => {
                let q = next.unwrap();
                let q_size = size_of_fragment(&self.buffer, q, self.arena_end);
                self.unbin(q, q_size);
                let q_next = next_of(&self.buffer, q);
                set_next(&mut self.buffer, off, q_next);
                if q_next != 0 {
                    set_prev_bits(&mut self.buffer, q_next, off);
                }
                self.insert_free(off, size + q_size);
            }
            (false, false) => {
                self.insert_free(off, size);
            }
        }
    }

    /// Resizes a previous allocation in place when possible, falling back
    /// to allocate-copy-free. See the module documentation for the
    /// decision order (shrink, expand forward, expand backward, fallback).
    pub fn reallocate(&mut self, ptr: Option<NonNull<u8>>, new_amount: usize) -> Option<NonNull<u8>> {
        self.ensure_init();
        let Some(ptr) = ptr else {
            return self.alloc(new_amount); // R1
        };
        if new_amount == 0 {
            let _ = self.free(Some(ptr)); // R2
            return None;
        }
        if new_amount > self.capacity - A {
            self.diagnostics.oom_count += 1; // R3
            return None;
        }

        let off = self.offset_of(ptr) - A;
        let size = size_of_fragment(&self.buffer, off, self.arena_end);
        let need = round_up_pow2(new_amount + A).max(FMIN);
        let old_amount = size - A;

        if need <= size {
            return Some(self.shrink_in_place(off, size, need, ptr)); // R4
        }

        if let Some(next) = next_addr(&self.buffer, off) {
            if !is_used(&self.buffer, next) {
                let next_size = size_of_fragment(&self.buffer, next, self.arena_end);
                if size + next_size >= need {
                    return Some(self.expand_forward(off, size, next, next_size, need, ptr)); // R5
                }
            }
        }

        if let Some(prev) = prev_addr(&self.buffer, off) {
            if !is_used(&self.buffer, prev) {
                let prev_size = size_of_fragment(&self.buffer, prev, self.arena_end);
                let next_free_size = next_addr(&self.buffer, off)
                    .filter(|&n| !is_used(&self.buffer, n))
                    .map(|n| size_of_fragment(&self.buffer, n, self.arena_end))
                    .unwrap_or(0);
                if prev_size + size + next_free_size >= need {
                    return Some(self.expand_backward(off, size, prev, prev_size, need, old_amount)); // R6
                }
            }
        }

        // R7: allocate, copy, free.
        let new_ptr = self.alloc(new_amount)?;
        let copy_len = old_amount.min(new_amount);
        // SAFETY: `ptr` and `new_ptr` are distinct, non-overlapping
        // fragments; `copy_len` does not exceed either's payload size.
        unsafe {
            core::ptr::copy_nonoverlapping(ptr.as_ptr(), new_ptr.as_ptr(), copy_len);
        }
        let _ = self.free(Some(ptr));
        Some(new_ptr)
    }

    /// R4: the fragment already satisfies the (smaller) request.
    fn shrink_in_place(
        &mut self,
        off: usize,
        size: usize,
        need: usize,
        ptr: NonNull<u8>,
    ) -> NonNull<u8> {
        let leftover = size - need;
        if leftover >= FMIN {
            let tail_off = off + need;
            let old_next = next_of(&self.buffer, off);
            let (tail_size, tail_next) = if old_next != 0 && !is_used(&self.buffer, old_next) {
                let next_size = size_of_fragment(&self.buffer, old_next, self.arena_end);
                self.unbin(old_next, next_size);
                (leftover + next_size, next_of(&self.buffer, old_next))
            } else {
                (leftover, old_next)
            };
            set_next(&mut self.buffer, off, tail_off);
            set_next(&mut self.buffer, tail_off, tail_next);
            set_prev_used_word(&mut self.buffer, tail_off, off);
            if tail_next != 0 {
                set_prev_bits(&mut self.buffer, tail_next, tail_off);
            }
            self.insert_free(tail_off, tail_size);
            self.diagnostics.allocated -= leftover;
        }
        ptr
    }

    /// R5: absorb all or part of the free fragment immediately following.
    fn expand_forward(
        &mut self,
        off: usize,
        size: usize,
        next_off: usize,
        next_size: usize,
        need: usize,
        ptr: NonNull<u8>,
    ) -> NonNull<u8> {
        self.unbin(next_off, next_size);
        let combined = size + next_size;
        let leftover = combined - need;
        let next_next = next_of(&self.buffer, next_off);

        let new_size = if leftover >= FMIN {
            let tail_off = off + need;
            set_next(&mut self.buffer, off, tail_off);
            set_next(&mut self.buffer, tail_off, next_next);
            set_prev_used_word(&mut self.buffer, tail_off, off);
            if next_next != 0 {
                set_prev_bits(&mut self.buffer, next_next, tail_off);
            }
            self.insert_free(tail_off, leftover);
            need
        } else {
            set_next(&mut self.buffer, off, next_next);
            if next_next != 0 {
                set_prev_bits(&mut self.buffer, next_next, off);
            }
            combined
        };

        self.diagnostics.allocated += new_size - size;
        self.diagnostics.peak_allocated =
            self.diagnostics.peak_allocated.max(self.diagnostics.allocated);
        ptr
    }

    /// R6: move into the free fragment immediately preceding (optionally
    /// also absorbing a free fragment immediately following).
    fn expand_backward(
        &mut self,
        off: usize,
        size: usize,
        prev_off: usize,
        prev_size: usize,
        need: usize,
        old_amount: usize,
    ) -> NonNull<u8> {
        self.unbin(prev_off, prev_size);

        let next_off = next_of(&self.buffer, off);
        let next_is_free = next_off != 0 && !is_used(&self.buffer, next_off);
        let next_size = if next_is_free {
            size_of_fragment(&self.buffer, next_off, self.arena_end)
        } else {
            0
        };
        if next_is_free {
            self.unbin(next_off, next_size);
        }
        let final_next = if next_is_free {
            next_of(&self.buffer, next_off)
        } else {
            next_off
        };
        let total = prev_size + size + next_size;
        let leftover = total - need;

        // SAFETY: `prev_off + A` and `off + A` are both valid, non-null
        // payload offsets within the buffer; `old_amount` does not exceed
        // the source fragment's payload size. The regions may overlap
        // (the destination is always strictly lower), so an overlap-
        // tolerant move is required here, not a non-overlapping copy.
        unsafe {
            let src = self.buffer.as_ptr().add(off + A);
            let dst = self.buffer.as_mut_ptr().add(prev_off + A);
            core::ptr::copy(src, dst, old_amount);
        }
        set_used(&mut self.buffer, prev_off, true);

        if leftover >= FMIN {
            let tail_off = prev_off + need;
            set_next(&mut self.buffer, prev_off, tail_off);
            set_next(&mut self.buffer, tail_off, final_next);
            set_prev_used_word(&mut self.buffer, tail_off, prev_off);
            if final_next != 0 {
                set_prev_bits(&mut self.buffer, final_next, tail_off);
            }
            self.insert_free(tail_off, leftover);
        } else {
            set_next(&mut self.buffer, prev_off, final_next);
            if final_next != 0 {
                set_prev_bits(&mut self.buffer, final_next, prev_off);
            }
        }

        let new_size = if leftover >= FMIN { need } else { total };
        self.diagnostics.allocated += new_size - size;
        self.diagnostics.peak_allocated =
            self.diagnostics.peak_allocated.max(self.diagnostics.allocated);

        // SAFETY: `prev_off + A` is within the buffer.
        let payload = unsafe { self.buffer.as_mut_ptr().add(prev_off + A) };
        NonNull::new(payload).unwrap()
    }

    /// The largest single allocation this allocator could ever satisfy.
    pub fn max_allocation_size(&mut self) -> usize {
        self.ensure_init();
        (1usize << floor_log2(self.capacity)) - A
    }

    /// A value-copy of the current diagnostics counters.
    pub fn diagnostics(&mut self) -> Diagnostics {
        self.ensure_init();
        self.diagnostics
    }

    /// Verifies the structural invariants documented on [`RawAllocator`]
    /// (and in the crate-level invariants list). This walks the whole
    /// fragment chain and every bin, so unlike every other public method
    /// it is **not** constant time; it exists for tests and debug-time
    /// self-checks, not the hot path.
    pub fn invariants_hold(&mut self) -> bool {
        self.ensure_init();
        let buf = &self.buffer;

        let mut off = 0usize;
        let mut sum_used = 0usize;
        let mut prev_was_free = false;
        loop {
            let size = size_of_fragment(buf, off, self.arena_end);
            if size < FMIN || size > self.capacity || size % FMIN != 0 {
                return false;
            }
            if is_used(buf, off) {
                sum_used += size;
                prev_was_free = false;
            } else {
                if prev_was_free {
                    return false;
                }
                prev_was_free = true;
            }
            let next = next_of(buf, off);
            if next == 0 {
                break;
            }
            off = next;
        }
        if sum_used != self.diagnostics.allocated {
            return false;
        }

        for bin in 0..BINS {
            let bit_set = (self.mask >> bin) & 1 == 1;
            if !bit_set {
                continue;
            }
            let lo = FMIN.wrapping_shl(bin as u32);
            let hi = lo.wrapping_shl(1);
            let mut cur = self.bins[bin];
            loop {
                if is_used(buf, cur) {
                    return false;
                }
                let size = size_of_fragment(buf, cur, self.arena_end);
                if size < lo || size >= hi {
                    return false;
                }
                let nf = next_free_of(buf, cur);
                if nf == NULL_FREE {
                    break;
                }
                cur = nf;
            }
        }

        let diag = self.diagnostics;
        if diag.peak_request_size == 0 {
            if diag.allocated != 0 || diag.peak_allocated != 0 || diag.oom_count != 0 {
                return false;
            }
        } else if diag.peak_request_size + A > diag.peak_allocated && diag.oom_count == 0 {
            return false;
        }
        if diag.peak_allocated < diag.allocated || diag.peak_allocated > self.capacity {
            return false;
        }

        true
    }
}

impl<const N: usize> Default for RawAllocator<N> {
    fn default() -> Self {
        Self::new()
    }
}
