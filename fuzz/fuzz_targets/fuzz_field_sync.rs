#![no_main]

//! Drive `FieldSync` with arbitrary event sequences and check its contract.

use arbitrary::Arbitrary;
use formbind_core::{Duration, FieldSync, Instant, Observation, SyncState};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Edit(u8),
    Observe(u8),
    External(u8),
    Advance(u16),
    Elapse,
    Blur,
    Destroy,
}

fuzz_target!(|ops: Vec<Op>| {
    let t0 = Instant::now();
    let mut now = t0;
    let mut sync = FieldSync::with_window(0_u8, Duration::from_millis(250));
    let mut destroyed = false;

    for op in ops {
        let commit = match op {
            Op::Edit(v) => {
                let deadline = sync.edit(v, now);
                assert_eq!(deadline.is_some(), !destroyed);
                if !destroyed {
                    assert_eq!(*sync.local(), v);
                }
                None
            }
            Op::Observe(v) => {
                let obs = sync.observe(&v);
                if obs == Observation::Overridden {
                    assert_eq!(*sync.local(), v);
                    assert!(sync.deadline().is_none());
                }
                None
            }
            Op::External(v) => {
                sync.external_change(v);
                if !destroyed {
                    assert_eq!(*sync.local(), v);
                    assert_eq!(sync.state(), SyncState::Idle);
                }
                None
            }
            Op::Advance(ms) => {
                now += Duration::from_millis(u64::from(ms));
                sync.poll(now)
            }
            Op::Elapse => sync.elapse(),
            Op::Blur => {
                let commit = sync.blur();
                assert!(sync.deadline().is_none());
                commit
            }
            Op::Destroy => {
                sync.destroy();
                destroyed = true;
                None
            }
        };

        if let Some(value) = commit {
            assert!(!destroyed, "commit after destroy");
            assert_ne!(value, *sync.authoritative(), "echo commit");
            assert_eq!(value, *sync.local());
        }
        if destroyed {
            assert_eq!(sync.state(), SyncState::Destroyed);
        } else {
            assert_ne!(sync.state(), SyncState::PendingFlush);
        }
    }
});
