//! Net heap accounting across failing tokenize calls.
//!
//! Lives in its own test binary because it installs a global allocator.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use uniword::prelude::*;

struct CountingAllocator;

thread_local! {
    static NET_BYTES: Cell<isize> = const { Cell::new(0) };
}

fn record(delta: isize) {
    let _ = NET_BYTES.try_with(|net| net.set(net.get() + delta));
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record(layout.size() as isize);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        record(-(layout.size() as isize));
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            record(new_size as isize - layout.size() as isize);
        }
        new_ptr
    }
}

#[global_allocator]
static ALLOCATOR: CountingAllocator = CountingAllocator;

fn net_bytes() -> isize {
    NET_BYTES.with(Cell::get)
}

#[test]
fn test_failing_calls_leave_no_allocations() -> Result<()> {
    let mut tokenizer = SegmentingTokenizer::create(&TokenizerConfig::default(), &BuiltinCapabilities)?;
    let input = [0x80, b'a', b'b', b'c'];
    let mut sink = |_: TokenFlags, _: &[u8], _: usize, _: usize| Flow::Continue;

    // Warm up once so lazily initialized state is not counted.
    assert!(tokenizer.tokenize(TokenizeFlags::DOCUMENT, &input, None, &mut sink).is_err());

    let before = net_bytes();
    for _ in 0..100 {
        let err = tokenizer
            .tokenize(TokenizeFlags::DOCUMENT, &input, None, &mut sink)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }
    assert_eq!(net_bytes(), before);
    Ok(())
}

#[test]
fn test_aborted_calls_leave_no_allocations() -> Result<()> {
    let mut tokenizer = SegmentingTokenizer::create(&TokenizerConfig::default(), &BuiltinCapabilities)?;
    let input = "первое второе третье".as_bytes();
    let mut sink = |_: TokenFlags, _: &[u8], _: usize, _: usize| Flow::Stop;

    assert!(tokenizer.tokenize(TokenizeFlags::DOCUMENT, input, None, &mut sink).is_err());

    let before = net_bytes();
    for _ in 0..100 {
        let err = tokenizer
            .tokenize(TokenizeFlags::DOCUMENT, input, None, &mut sink)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CallbackAbort);
    }
    assert_eq!(net_bytes(), before);
    Ok(())
}
