//! Dispatch ordering seen through the public API.

use std::sync::Arc;

use ordcast::{Channel, ChannelConfig, Signal, Subscriber};
use parking_lot::Mutex;

type Calls = Arc<Mutex<Vec<&'static str>>>;

fn recorder(calls: &Calls, label: &'static str) -> Subscriber<Signal> {
    let calls = Arc::clone(calls);
    Subscriber::named(label, move || calls.lock().push(label))
}

fn fire(ch: &Channel<Signal>, calls: &Calls) -> Vec<&'static str> {
    calls.lock().clear();
    ch.invoke(());
    calls.lock().clone()
}

#[test]
fn priorities_and_ties() {
    let ch: Channel<Signal> = Channel::new("ordering");
    let calls = Calls::default();
    let s1 = recorder(&calls, "s1");
    let s2 = recorder(&calls, "s2");
    let s3 = recorder(&calls, "s3");

    ch.subscribe(&s1, 5);
    ch.subscribe(&s2, 10);
    ch.subscribe(&s3, 5);
    assert_eq!(fire(&ch, &calls), vec!["s2", "s3", "s1"]);

    // Same priority again: no move among peers.
    ch.subscribe(&s1, 5);
    assert_eq!(fire(&ch, &calls), vec!["s2", "s3", "s1"]);

    // Rank change: lands where a fresh 20 would.
    ch.subscribe(&s1, 20);
    assert_eq!(fire(&ch, &calls), vec!["s1", "s2", "s3"]);

    ch.unsubscribe(&s2);
    assert_eq!(fire(&ch, &calls), vec!["s1", "s3"]);
    ch.unsubscribe(&s2);
    assert_eq!(fire(&ch, &calls), vec!["s1", "s3"]);
}

#[test]
fn sole_priority_entry_keeps_position() {
    let ch: Channel<Signal> = Channel::new("sole");
    let calls = Calls::default();
    let low = recorder(&calls, "low");
    let mid = recorder(&calls, "mid");
    let high = recorder(&calls, "high");
    ch.subscribe(&low, 1);
    ch.subscribe(&mid, 5);
    ch.subscribe(&high, 9);

    ch.subscribe(&mid, 5);
    ch.subscribe(&mid, 6);
    assert_eq!(ch.priority_of(&mid), Some(6));
    assert_eq!(fire(&ch, &calls), vec!["high", "mid", "low"]);
}

#[test]
fn boundary_resubscribe_within_tie() {
    // Three peers at 5; re-subscribing each at 5 never reorders them.
    let cfg = ChannelConfig::default().with_capacity(4);
    let ch: Channel<Signal> = Channel::with_config("boundary", cfg);
    let calls = Calls::default();
    let a = recorder(&calls, "a");
    let b = recorder(&calls, "b");
    let c = recorder(&calls, "c");
    ch.subscribe(&a, 5);
    ch.subscribe(&b, 5);
    ch.subscribe(&c, 5);

    for s in [&a, &b, &c, &b] {
        ch.subscribe(s, 5);
        assert_eq!(ch.dispatch_order(), vec!["c", "b", "a"]);
    }

    // The last of the tie sits right before the insertion slot of 6.
    ch.subscribe(&c, 6);
    assert_eq!(ch.dispatch_order(), vec!["c", "b", "a"]);

    // The first of the tie does not: it becomes the newest 6.
    ch.subscribe(&a, 6);
    assert_eq!(ch.dispatch_order(), vec!["a", "c", "b"]);
    assert_eq!(ch.len(), 3);
}

#[test]
fn custom_priority_type() {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
    enum Stage {
        Late,
        Normal,
        Early,
    }

    let ch: Channel<Signal, Stage> = Channel::new("stages");
    let calls = Calls::default();
    ch.subscribe(&recorder(&calls, "normal"), Stage::Normal);
    ch.subscribe(&recorder(&calls, "late"), Stage::Late);
    ch.subscribe(&recorder(&calls, "early"), Stage::Early);

    ch.invoke(());
    assert_eq!(*calls.lock(), vec!["early", "normal", "late"]);
}
