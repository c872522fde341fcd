use std::sync::atomic::{AtomicUsize, Ordering};

use premain::{postmain, premain};

static NEXT: AtomicUsize = AtomicUsize::new(1);
static EARLY: AtomicUsize = AtomicUsize::new(0);
static LATE: AtomicUsize = AtomicUsize::new(0);
static UNORDERED: AtomicUsize = AtomicUsize::new(0);
static UNSAFE_INIT: AtomicUsize = AtomicUsize::new(0);

fn stamp(slot: &AtomicUsize) {
    slot.store(NEXT.fetch_add(1, Ordering::SeqCst), Ordering::SeqCst);
}

#[premain(101)]
fn early() {
    stamp(&EARLY);
}

#[premain(200)]
fn late() -> i32 {
    stamp(&LATE);
    0
}

#[premain]
fn unordered() {
    stamp(&UNORDERED);
}

#[premain]
unsafe fn unsafe_init() {
    stamp(&UNSAFE_INIT);
}

#[premain]
fn answer() -> i32 {
    42
}

// only observable from outside the process; here it just has to build
#[postmain]
fn flush_nothing() {}

#[test]
fn hooks_run_before_tests() {
    for slot in [&EARLY, &LATE, &UNORDERED, &UNSAFE_INIT] {
        assert_ne!(slot.load(Ordering::SeqCst), 0);
    }
}

#[test]
fn each_hook_runs_once() {
    // four hooks, stamps start at 1
    assert_eq!(NEXT.load(Ordering::SeqCst), 5);
}

#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
#[test]
fn priorities_run_lowest_first_and_before_unprioritized_hooks() {
    let early = EARLY.load(Ordering::SeqCst);
    let late = LATE.load(Ordering::SeqCst);
    let unordered = UNORDERED.load(Ordering::SeqCst);

    assert!(early < late, "early={} late={}", early, late);
    assert!(late < unordered, "late={} unordered={}", late, unordered);
}

#[test]
fn tagged_functions_stay_callable() {
    assert_eq!(answer(), 42);
}
