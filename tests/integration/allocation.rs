//! Comparing blocks without touching the heap
//!
//! Counts allocations made on the current thread while `equal` runs.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use abc::block::equal;
use abc::reader::parse;

struct Counting;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

unsafe impl GlobalAlloc for Counting {
    unsafe fn alloc(
        &self,
        layout: Layout,
    ) -> *mut u8 {
        let _ = ALLOCATIONS.try_with(|count| count.set(count.get() + 1));
        System.alloc(layout)
    }

    unsafe fn dealloc(
        &self,
        ptr: *mut u8,
        layout: Layout,
    ) {
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static GLOBAL: Counting = Counting;

fn allocations_while<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let before = ALLOCATIONS.with(Cell::get);
    let value = f();
    (value, ALLOCATIONS.with(Cell::get) - before)
}

#[test]
fn test_flat_code_compares_without_allocating() {
    let text = "copy drop swap app 1 2.5 box cat eq neq";
    let lhs = parse(text).unwrap();
    let rhs = parse(text).unwrap();
    let (same, count) = allocations_while(|| equal(&lhs, &rhs));
    assert!(same);
    assert_eq!(count, 0);

    let other = parse("copy drop swap app 1 2.5 box cat eq tag").unwrap();
    let (same, count) = allocations_while(|| equal(&lhs, &other));
    assert!(!same);
    assert_eq!(count, 0);
}

#[test]
fn test_nested_quotes_compare_without_allocating() {
    let text = "copy [drop [swap [[app]]]]";
    let lhs = parse(text).unwrap();
    let rhs = parse(text).unwrap();
    let (same, count) = allocations_while(|| equal(&lhs, &rhs));
    assert!(same);
    assert_eq!(count, 0);
}

#[test]
fn test_quote_heading_code_still_compares() {
    let lhs = parse("[copy] [drop] swap").unwrap();
    let rhs = parse("[copy] [drop] swap").unwrap();
    let wrong = parse("[copy] [drop] app").unwrap();
    assert!(equal(&lhs, &rhs));
    assert!(!equal(&lhs, &wrong));
}
