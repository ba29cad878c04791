// src/crawl/frontier.rs
// =============================================================================
// The Frontier: a thread-safe, deduplicating work queue shared by all workers.
//
// It owns three pieces of state, all behind ONE mutex:
// - visited:   every address ever admitted (only grows)
// - pending:   admitted addresses not yet claimed by a worker (FIFO)
// - in_flight: addresses claimed by a worker but not yet reported processed
//
// Two condition variables hang off that mutex:
// - work_ready: signaled when something is pushed onto `pending`
// - drained:    signaled when pending is empty AND in_flight is zero
//
// Because admission (check visited + insert + enqueue) happens under the lock,
// two workers can never both claim the same address. Because in_flight shares
// the lock with pending, "drained" can never be observed while a worker is
// still holding an address whose links are not admitted yet.
// =============================================================================

use super::Address;
use std::collections::{HashSet, VecDeque};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct FrontierState {
    visited: HashSet<Address>,
    pending: VecDeque<Address>,
    in_flight: usize,
    processed: usize,
}

impl FrontierState {
    fn is_drained(&self) -> bool {
        self.pending.is_empty() && self.in_flight == 0
    }
}

#[derive(Debug, Default)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    work_ready: Condvar,
    drained: Condvar,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    // Atomically admits an address that has never been seen before
    //
    // Returns: true if the address was new (now visited and pending),
    //          false if it was already admitted (no effect)
    //
    // The sentinel is never admitted.
    pub fn try_admit(&self, address: Address) -> bool {
        if address.is_sentinel() {
            return false;
        }

        let mut state = self.lock();
        // HashSet::insert is the check-and-insert: it reports whether the key
        // was newly added, so there is no separate "contains" step to race on.
        if !state.visited.insert(address.clone()) {
            return false;
        }
        state.pending.push_back(address);
        drop(state);

        self.work_ready.notify_one();
        true
    }

    // Blocks until an address is pending, then claims it
    //
    // Claimed addresses count as in-flight until mark_processed() is called.
    // Sentinels are handed out but never counted.
    pub fn next(&self) -> Address {
        let mut state = self.lock();
        loop {
            if let Some(address) = state.pending.pop_front() {
                if !address.is_sentinel() {
                    state.in_flight += 1;
                }
                return address;
            }
            state = self
                .work_ready
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    // Reports that one claimed address is done
    //
    // Must be called after every link found on that page has gone through
    // try_admit(), otherwise the coordinator could see a false "drained".
    pub fn mark_processed(&self) {
        let mut state = self.lock();
        debug_assert!(state.in_flight > 0, "mark_processed() without a claimed address");
        state.in_flight = state.in_flight.saturating_sub(1);
        state.processed += 1;
        let drained = state.is_drained();
        drop(state);

        if drained {
            self.drained.notify_all();
        }
    }

    // Blocks until no address is pending and none is in flight
    pub fn wait_drained(&self) {
        let state = self.lock();
        let _state = self
            .drained
            .wait_while(state, |state| !state.is_drained())
            .unwrap_or_else(PoisonError::into_inner);
    }

    // Pushes `count` termination sentinels, bypassing dedup
    //
    // Every worker blocked in next() (now or later) receives exactly one.
    pub fn push_sentinels(&self, count: usize) {
        let mut state = self.lock();
        for _ in 0..count {
            state.pending.push_back(Address::sentinel());
        }
        drop(state);

        self.work_ready.notify_all();
    }

    // Point-in-time copy of every address admitted so far
    pub fn snapshot_visited(&self) -> HashSet<Address> {
        self.lock().visited.clone()
    }

    #[cfg(test)]
    pub fn is_drained(&self) -> bool {
        self.lock().is_drained()
    }

    pub fn visited_len(&self) -> usize {
        self.lock().visited.len()
    }

    #[cfg(test)]
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    #[cfg(test)]
    pub fn in_flight(&self) -> usize {
        self.lock().in_flight
    }

    // Number of mark_processed() calls so far
    pub fn processed(&self) -> usize {
        self.lock().processed
    }

    // Every critical section leaves the state consistent before anything that
    // can panic, so a poisoned lock still guards valid data.
    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a Condvar?
//    - A condition variable lets a thread sleep until another thread says
//      "something changed". It is always paired with a Mutex: wait() releases
//      the lock while sleeping and takes it back before returning.
//
// 2. Why wait() in a loop / wait_while()?
//    - Condition variables can wake up spuriously. We always re-check the
//      condition after waking instead of trusting the wake-up itself.
//
// 3. notify_one() vs notify_all()
//    - notify_one() wakes a single sleeping worker: one new address is
//      enough work for one worker.
//    - notify_all() wakes everyone: sentinels are meant for every worker.
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn addr(raw: &str) -> Address {
        Address::parse(raw)
    }

    #[test]
    fn test_admit_is_idempotent() {
        let frontier = Frontier::new();
        assert!(frontier.try_admit(addr("https://site.com/a")));
        assert!(!frontier.try_admit(addr("https://site.com/a")));
        assert!(!frontier.try_admit(addr("https://site.com/a#section")));
        assert_eq!(frontier.visited_len(), 1);
        assert_eq!(frontier.pending_len(), 1);
    }

    #[test]
    fn test_concurrent_admission_has_one_winner() {
        let frontier = Arc::new(Frontier::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let frontier = Arc::clone(&frontier);
                thread::spawn(move || {
                    (0..100)
                        .filter(|_| frontier.try_admit(addr("https://site.com/contended")))
                        .count()
                })
            })
            .collect();

        let winners: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(winners, 1);
        assert_eq!(frontier.visited_len(), 1);
        assert_eq!(frontier.pending_len(), 1);
    }

    #[test]
    fn test_sentinel_is_never_admitted() {
        let frontier = Frontier::new();
        assert!(!frontier.try_admit(Address::sentinel()));
        assert_eq!(frontier.visited_len(), 0);
        assert!(frontier.is_drained());
    }

    #[test]
    fn test_next_is_fifo_and_tracks_in_flight() {
        let frontier = Frontier::new();
        frontier.try_admit(addr("https://site.com/1"));
        frontier.try_admit(addr("https://site.com/2"));

        assert_eq!(frontier.next(), addr("https://site.com/1"));
        assert_eq!(frontier.in_flight(), 1);
        assert_eq!(frontier.next(), addr("https://site.com/2"));
        assert_eq!(frontier.in_flight(), 2);
        assert!(!frontier.is_drained());

        frontier.mark_processed();
        frontier.mark_processed();
        assert!(frontier.is_drained());
        assert_eq!(frontier.processed(), 2);
        // Claimed addresses stay visited
        assert_eq!(frontier.visited_len(), 2);
    }

    #[test]
    fn test_not_drained_while_in_flight_even_with_empty_queue() {
        let frontier = Frontier::new();
        frontier.try_admit(addr("https://site.com/"));
        let _claimed = frontier.next();

        assert_eq!(frontier.pending_len(), 0);
        assert!(!frontier.is_drained());

        // New work discovered before the page is reported done
        frontier.try_admit(addr("https://site.com/child"));
        frontier.mark_processed();
        assert!(!frontier.is_drained());

        let _child = frontier.next();
        frontier.mark_processed();
        assert!(frontier.is_drained());
    }

    #[test]
    fn test_wait_drained_returns_immediately_when_empty() {
        let frontier = Frontier::new();
        frontier.wait_drained();
    }

    #[test]
    fn test_wait_drained_wakes_after_last_page() {
        let frontier = Arc::new(Frontier::new());
        frontier.try_admit(addr("https://site.com/"));

        let worker = {
            let frontier = Arc::clone(&frontier);
            thread::spawn(move || {
                let _page = frontier.next();
                frontier.try_admit(addr("https://site.com/next"));
                frontier.mark_processed();
                let _page = frontier.next();
                frontier.mark_processed();
            })
        };

        frontier.wait_drained();
        worker.join().unwrap();
        assert!(frontier.is_drained());
        assert_eq!(frontier.processed(), 2);
    }

    #[test]
    fn test_blocked_workers_wake_on_sentinels() {
        let frontier = Arc::new(Frontier::new());
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let frontier = Arc::clone(&frontier);
                thread::spawn(move || frontier.next())
            })
            .collect();

        frontier.push_sentinels(4);
        for worker in workers {
            assert!(worker.join().unwrap().is_sentinel());
        }
        // Sentinels are not work
        assert_eq!(frontier.in_flight(), 0);
        assert_eq!(frontier.visited_len(), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "without a claimed address")]
    fn test_mark_processed_without_claim_panics() {
        let frontier = Frontier::new();
        frontier.try_admit(addr("https://site.com/"));
        frontier.mark_processed();
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let frontier = Frontier::new();
        frontier.try_admit(addr("https://site.com/"));
        let snapshot = frontier.snapshot_visited();
        frontier.try_admit(addr("https://site.com/later"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(frontier.visited_len(), 2);
    }
}
