//! Constant-time memory allocator for embedded systems
//!
//! This crate provides a single type called [`Allocator`]. This type
//! implements the [`core::alloc::GlobalAlloc`]-trait, which is required to
//! use the [`alloc`-crate][alloc] on `#![no_std]`-targets.
//!
//! # Usage
//! Just copy and paste the following code snippet into your binary crate
//! and adjust the number of bytes of the heap (here 4K):
//! ```no_run
//! #[global_allocator]
//! static ALLOCATOR: arealloc::Allocator<4096> = arealloc::Allocator::new();
//!
//! extern crate alloc;
//! ```
//! Afterwards you don't need to interact with the crate or the variable
//! `ALLOCATOR` anymore. Now you can just `use alloc::vec::Vec` or even
//! `use alloc::collections::BTreeMap`, i.e. every fancy collection which is
//! normally provided by `std`.
//!
//! # Implementation
//! Unlike a simple linear-scan allocator, this crate services every
//! request in time bounded by a small constant, independent of the heap
//! size, the number of live allocations, or the fragmentation pattern.
//! It does so with a segregated free-list design: free fragments are kept
//! in one doubly-linked list per power-of-two size class, and a
//! word-sized bitmask records which lists are non-empty, so picking a
//! fragment large enough for a request never requires scanning the heap —
//! only masking the bitmask and reading one list head. See
//! [`raw_allocator`] for the full design.
//!
//! Note to users with things like `MPU`s, `MMU`s, etc.: your device might
//! support things like memory remapping or memory protection with setting
//! read/write/execution rights. This crate _doesn't use_ those features at
//! all! If that is desired, you should take the address of the buffer and
//! use that along with the known size `N` to protect the heap memory.
//!
//! [alloc]: https://doc.rust-lang.org/alloc/index.html
#![no_std]
#![warn(unsafe_op_in_unsafe_fn)]
#![warn(clippy::undocumented_unsafe_blocks)]

mod raw_allocator;
pub use raw_allocator::{Diagnostics, FreeError, RawAllocator, MIN_ARENA_SIZE};
use raw_allocator::A;

use core::alloc::{GlobalAlloc, Layout};
use core::mem::size_of;
use core::ptr::{self, NonNull};

/// The memory allocator for embedded systems.
///
/// This is the core type of this crate: an allocator with a predefined
/// heap size, usable as `#[global_allocator]`. Therefore the heap memory
/// usage is statically limited to an upper value, which also helps to
/// prevent issues with heap/stack-smashes, as the heap is counted to the
/// static memory (e.g. `.data`/`.bss`-sections).
///
/// Its usage is simple: just copy and paste the following in the binary
/// crate you're developing. The memory size of the heap is `4096` or 4K in
/// this example. Adjust that value to your needs.
/// ```no_run
/// #[global_allocator]
/// static ALLOCATOR: arealloc::Allocator<4096> = arealloc::Allocator::new();
/// ```
/// Also please refer to the [crate-level](crate)-documentation for
/// recommendations on the buffer size and general usage.
pub struct Allocator<const N: usize> {
    /// The internal engine.
    ///
    /// The raw allocator handles allocation of byte ranges without
    /// worrying about alignments beyond its own fixed natural alignment.
    /// It is guarded by a `spin::Mutex` to make it usable with the shared
    /// references [`GlobalAlloc`] requires.
    raw: spin::Mutex<RawAllocator<N>>,
}

impl<const N: usize> Allocator<N> {
    /// Create a new [`Allocator`].
    ///
    /// This function is a `const fn`, therefore you can call it directly
    /// when creating the allocator.
    ///
    /// # Panics
    /// This function will panic if `N` is smaller than
    /// [`MIN_ARENA_SIZE`] for this platform.
    #[must_use = "assign the allocator to a static variable and apply the `#[global_allocator]`-attribute to make it the global allocator"]
    pub const fn new() -> Self {
        Self {
            raw: spin::Mutex::new(RawAllocator::new()),
        }
    }

    /// Aligns a given pointer up to the specified alignment.
    ///
    /// # Safety
    /// This function requires `align` to be a power of two and requires
    /// `ptr` to point into a memory region large enough that the aligned
    /// pointer is still within that region.
    unsafe fn align_to(ptr: *mut u8, align: usize) -> *mut u8 {
        let addr = ptr as usize;
        let mismatch = addr & (align - 1);
        let offset = if mismatch != 0 { align - mismatch } else { 0 };
        // SAFETY: the "in-bounds" requirement is part of this function's
        // safety contract, and is the caller's responsibility.
        unsafe { ptr.add(offset) }
    }
}

impl<const N: usize> Default for Allocator<N> {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: the safety contract of `GlobalAlloc` is lengthy, but in short:
// the implementation does not panic (a panic would be a bug) and the
// returned pointers always satisfy the requested layout (ensured by
// tests), falling back to over-allocation and pointer-shifting whenever
// the requested alignment exceeds the engine's own natural alignment.
unsafe impl<const N: usize> GlobalAlloc for Allocator<N> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let align = layout.align();
        if align <= A {
            // The engine always returns `A`-aligned payloads, so smaller
            // or equal alignments are satisfied for free.
            match self.raw.lock().alloc(layout.size()) {
                Some(payload) => payload.as_ptr(),
                None => ptr::null_mut(),
            }
        } else {
            // Over-allocate enough room to shift the pointer up to the
            // requested alignment, plus one word to stash the real
            // fragment pointer so `dealloc`/`realloc` can recover it
            // without a scan.
            let stash = size_of::<usize>();
            let size = match layout.size().checked_add(align).and_then(|s| s.checked_add(stash)) {
                Some(size) => size,
                None => return ptr::null_mut(),
            };
            match self.raw.lock().alloc(size) {
                Some(raw_payload) => {
                    // SAFETY: `raw_payload` points to `size` writable
                    // bytes just allocated above.
                    let data_region = unsafe { raw_payload.as_ptr().add(stash) };
                    // SAFETY: `align_to`'s contract holds: `align` is a
                    // power of two (guaranteed by `Layout`) and the
                    // over-allocation above leaves enough room.
                    let aligned = unsafe { Self::align_to(data_region, align) };
                    // SAFETY: there are at least `stash` bytes of
                    // reserved slack immediately before `aligned`.
                    unsafe {
                        aligned.cast::<usize>().sub(1).write_unaligned(raw_payload.as_ptr() as usize);
                    }
                    aligned
                }
                None => ptr::null_mut(),
            }
        }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: `ptr`/`layout` describe a live allocation from `alloc`
        // above.
        let real_ptr = unsafe { Self::real_payload_ptr(ptr, layout.align()) };
        // alignment is irrelevant from here on: `RawAllocator::free` only
        // needs the exact payload pointer it originally handed out. Any
        // detected misuse is ignored rather than panicking, per
        // `GlobalAlloc`'s no-panic contract; there is no process to abort
        // and no stable way to do so from `core`.
        let _ = self.raw.lock().free(NonNull::new(real_ptr));
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let align = layout.align();
        if align <= A {
            match self.raw.lock().reallocate(NonNull::new(ptr), new_size) {
                Some(payload) => payload.as_ptr(),
                None => ptr::null_mut(),
            }
        } else {
            // The in-place fast paths operate on the engine's own
            // fragment pointers; once a pointer has been shifted for
            // over-alignment there is no cheap way to resize the
            // underlying fragment without potentially losing the stash.
            // Fall back to allocate-copy-free, matching `GlobalAlloc`'s
            // own default `realloc` behavior for this case.
            // SAFETY: `align` came from a valid `Layout`, so it is a
            // non-zero power of two; `new_size` does not overflow
            // `isize` because the engine would already have rejected an
            // equally oversized original request.
            let new_layout = unsafe { Layout::from_size_align_unchecked(new_size, align) };
            // SAFETY: `new_layout` has the same (valid) alignment as
            // `layout`.
            let new_ptr = unsafe { self.alloc(new_layout) };
            if !new_ptr.is_null() {
                let copy_size = layout.size().min(new_size);
                // SAFETY: `ptr` is valid for `copy_size` reads (it was
                // allocated with at least `layout.size()` bytes) and
                // `new_ptr` is valid for `copy_size` writes from the
                // freshly-returned allocation above; the two regions are
                // distinct allocations and cannot overlap.
                unsafe { ptr::copy_nonoverlapping(ptr, new_ptr, copy_size) };
                // SAFETY: `ptr`/`layout` describe the allocation being
                // replaced.
                unsafe { self.dealloc(ptr, layout) };
            }
            new_ptr
        }
    }
}

impl<const N: usize> Allocator<N> {
    /// Recovers the true fragment pointer handed out by the engine from a
    /// possibly over-alignment-shifted user pointer.
    ///
    /// # Safety
    /// `ptr` must have been returned by this allocator's `alloc` for a
    /// layout with the given `align`.
    unsafe fn real_payload_ptr(ptr: *mut u8, align: usize) -> *mut u8 {
        if align <= A {
            ptr
        } else {
            // SAFETY: `alloc` always stashes the real pointer one word
            // before the aligned pointer it returns whenever `align > A`.
            unsafe { ptr.cast::<usize>().sub(1).read_unaligned() as *mut u8 }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Allocator;
    use core::alloc::{GlobalAlloc, Layout};
    use core::ptr;

    #[test]
    fn alignment_of_align_to() {
        #[repr(align(16))]
        struct Align([u8; 16]);
        let mut buf = Align([0_u8; 16]);
        let base: *mut u8 = ptr::addr_of_mut!(buf.0).cast();

        let ptr_0x0 = base;
        let ptr_0x1 = base.wrapping_add(1);
        let ptr_0x4 = base.wrapping_add(4);
        let ptr_0xc = base.wrapping_add(0xc);
        let ptr_0x10 = base.wrapping_add(0x10);

        assert_eq!(unsafe { Allocator::<64>::align_to(ptr_0x1, 4) }, ptr_0x4);
        assert_eq!(unsafe { Allocator::<64>::align_to(ptr_0x0, 4) }, ptr_0x0);
        assert_eq!(unsafe { Allocator::<64>::align_to(ptr_0x1, 1) }, ptr_0x1);
        assert_eq!(unsafe { Allocator::<64>::align_to(ptr_0xc, 16) }, ptr_0x10);
    }

    macro_rules! assert_alignment {
        ($ptr:expr, $align:expr) => {{
            assert_eq!(($ptr as usize) % $align, 0, "alignment not fulfilled");
        }};
    }

    #[test]
    fn small_alignments() {
        let allocator = Allocator::<256>::new();

        let layout = Layout::from_size_align(8, 2).unwrap();
        let ptr = unsafe { allocator.alloc(layout) };
        assert_alignment!(ptr, 2);
        unsafe { allocator.dealloc(ptr, layout) };
    }

    #[test]
    fn medium_alignments() {
        let allocator = Allocator::<1024>::new();

        let layout = Layout::from_size_align(4, 64).unwrap();
        let ptr = unsafe { allocator.alloc(layout) };
        assert_alignment!(ptr, 64);
        unsafe { allocator.dealloc(ptr, layout) };

        let layout = Layout::from_size_align(4, 256).unwrap();
        let ptr = unsafe { allocator.alloc(layout) };
        assert_alignment!(ptr, 256);
        unsafe { allocator.dealloc(ptr, layout) };
    }

    #[test]
    fn example_usage() {
        static ALLOCATOR: Allocator<4096> = Allocator::new();

        unsafe {
            let layout1 = Layout::new::<u32>();
            let ptr1 = ALLOCATOR.alloc(layout1);
            assert_ne!(ptr1, ptr::null_mut());

            let layout2 = Layout::new::<f64>();
            let ptr2 = ALLOCATOR.alloc(layout2);
            assert_ne!(ptr2, ptr::null_mut());

            let layout3 = Layout::new::<[u16; 12]>();
            let ptr3 = ALLOCATOR.alloc(layout3);
            assert_ne!(ptr3, ptr::null_mut());

            ALLOCATOR.dealloc(ptr2, layout2);

            let layout4 = Layout::new::<[u128; 3]>();
            let ptr4 = ALLOCATOR.alloc(layout4);
            assert_ne!(ptr4, ptr::null_mut());

            let layout5 = Layout::new::<f32>();
            let ptr5 = ALLOCATOR.alloc(layout5);
            assert_ne!(ptr5, ptr::null_mut());

            ALLOCATOR.dealloc(ptr3, layout3);
            ALLOCATOR.dealloc(ptr4, layout4);
            ALLOCATOR.dealloc(ptr5, layout5);
            ALLOCATOR.dealloc(ptr1, layout1);
        }
    }

    #[test]
    fn realloc_grow_and_shrink_preserve_contents() {
        let allocator = Allocator::<4096>::new();
        let layout = Layout::from_size_align(16, 1).unwrap();
        unsafe {
            let ptr = allocator.alloc(layout);
            assert!(!ptr.is_null());
            ptr::write_bytes(ptr, 0xAB, 16);

            let grown = allocator.realloc(ptr, layout, 512);
            assert!(!grown.is_null());
            for i in 0..16 {
                assert_eq!(*grown.add(i), 0xAB);
            }

            let grown_layout = Layout::from_size_align(512, 1).unwrap();
            let shrunk = allocator.realloc(grown, grown_layout, 8);
            assert!(!shrunk.is_null());
            for i in 0..8 {
                assert_eq!(*shrunk.add(i), 0xAB);
            }
            allocator.dealloc(shrunk, Layout::from_size_align(8, 1).unwrap());
        }
    }
}
