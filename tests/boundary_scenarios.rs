//! Seed tests for the boundary scenarios the allocator's invariants and
//! reallocation fast paths are expected to satisfy.

use arealloc::RawAllocator;

const WORD: usize = core::mem::size_of::<usize>();
const A: usize = 2 * WORD;
const FMIN: usize = 2 * A;

#[test]
fn minimum_arena_single_allocation() {
    let mut raw = RawAllocator::<{ 2 * A }>::new();
    let p = raw.alloc(1).expect("single allocation must succeed");
    assert_eq!((p.as_ptr() as usize) % A, 0);
    assert_eq!(raw.diagnostics().allocated, FMIN);
    assert!(raw.invariants_hold());

    assert_eq!(raw.free(Some(p)), Ok(()));
    assert_eq!(raw.diagnostics().allocated, 0);
    assert!(raw.invariants_hold());
}

#[test]
fn maximum_size_allocation_round_trip() {
    const ARENA: usize = 4096;
    let mut raw = RawAllocator::<ARENA>::new();
    let max = raw.max_allocation_size();
    assert_eq!(max, ARENA - A);

    let p = raw.alloc(max).expect("max allocation must succeed");
    assert_eq!(raw.diagnostics().allocated, ARENA);
    assert!(raw.invariants_hold());

    let over = raw.alloc(max + 1);
    assert!(over.is_none());
    assert_eq!(raw.diagnostics().oom_count, 1);

    assert_eq!(raw.free(Some(p)), Ok(()));
    assert_eq!(raw.diagnostics().allocated, 0);
}

#[test]
fn merge_both_on_triple() {
    // Sized so the three allocations consume the whole arena, otherwise
    // freeing `c` would already merge with a further free tail.
    let mut raw = RawAllocator::<{ 3 * FMIN }>::new();
    let a = raw.alloc(1).unwrap();
    let b = raw.alloc(1).unwrap();
    let c = raw.alloc(1).unwrap();

    raw.free(Some(a)).unwrap();
    raw.free(Some(c)).unwrap();
    raw.free(Some(b)).unwrap();
    assert!(raw.invariants_hold());
    assert_eq!(raw.diagnostics().allocated, 0);

    // The merged fragment spans 3 * FMIN and can satisfy a fresh request
    // for FMIN-sized payload at the address `a` originally occupied.
    let d = raw.alloc(FMIN - A).unwrap();
    assert_eq!(d, a);
}

#[test]
fn shrink_in_place_preserves_pointer_and_prefix() {
    let mut raw = RawAllocator::<4096>::new();
    let p = raw.alloc(200).unwrap();
    unsafe { core::ptr::write_bytes(p.as_ptr(), 0x42, 200) };

    let q = raw.reallocate(Some(p), 32).unwrap();
    assert_eq!(p, q);
    assert_eq!(raw.diagnostics().allocated, 64);
    for i in 0..32 {
        assert_eq!(unsafe { *q.as_ptr().add(i) }, 0x42);
    }
    assert!(raw.invariants_hold());
}

#[test]
fn backward_expand_with_split_preserves_prefix() {
    let mut raw = RawAllocator::<4096>::new();
    // Build: [free 256][used 64 = P][used 64][...]
    let big = raw.alloc(256 - A).unwrap();
    let p_block = raw.alloc(64 - A).unwrap();
    let after = raw.alloc(64 - A).unwrap();
    raw.free(Some(big)).unwrap();

    unsafe { core::ptr::write_bytes(p_block.as_ptr(), 0x7A, 64 - A) };

    // `p_block`'s successor (`after`) is still used, so only the backward
    // path (via the freed `big` fragment) can satisfy this request.
    let new_ptr = raw.reallocate(Some(p_block), 60).unwrap();
    assert_ne!(new_ptr, p_block);
    for i in 0..(64 - A) {
        assert_eq!(unsafe { *new_ptr.as_ptr().add(i) }, 0x7A);
    }
    assert!(raw.invariants_hold());
    let _ = after;
}

#[test]
fn fragmentation_induced_oom_without_capacity_exhaustion() {
    let mut raw = RawAllocator::<4096>::new();

    let mut pointers: std::vec::Vec<core::ptr::NonNull<u8>> = std::vec::Vec::new();
    loop {
        match raw.alloc(1) {
            Some(p) => pointers.push(p),
            None => break,
        }
    }
    assert!(pointers.len() > 2);

    // Free every other fragment, leaving single-FMIN gaps.
    for (i, p) in pointers.iter().enumerate() {
        if i % 2 == 1 {
            raw.free(Some(*p)).unwrap();
        }
    }

    // A request for two adjacent FMIN fragments (2*FMIN payload) cannot be
    // satisfied by any single isolated free fragment.
    let before_oom = raw.diagnostics().oom_count;
    let big = raw.alloc(2 * FMIN - A);
    assert!(big.is_none());
    assert_eq!(raw.diagnostics().oom_count, before_oom + 1);

    // But a single FMIN-sized allocation still succeeds.
    let small = raw.alloc(1);
    assert!(small.is_some());
    assert!(raw.invariants_hold());
}
