//! Process-wide failure sink behavior across channels.

use std::sync::Arc;

use ordcast::sinks::{self, CollectingSink};
use ordcast::{Channel, ChannelConfig, Failure, FailureSink, Signal, Subscriber, Values};
use parking_lot::Mutex;

/// Every test here touches the global sink.
static LOCK: Mutex<()> = Mutex::new(());

#[test]
fn faults_are_tagged_with_channel_and_subscriber() {
    let _lock = LOCK.lock();
    let sink = CollectingSink::new();
    let _guard = sinks::scoped(sink.clone());

    let ch: Channel<Values<(u32,)>> = Channel::new("damage");
    let total = Arc::new(Mutex::new(0));
    let t = Arc::clone(&total);
    ch.subscribe(&Subscriber::named("armor", |_: u32| panic!("armor missing")), 10);
    ch.subscribe(&Subscriber::named("health", move |d: u32| *t.lock() += d), 0);

    ch.invoke((4,));
    ch.invoke((6,));

    assert_eq!(*total.lock(), 10);
    let records = sink.records();
    assert_eq!(records.len(), 2);
    for r in &records {
        assert_eq!(r.channel.as_deref(), Some("damage"));
        assert_eq!(r.subscriber.as_deref(), Some("armor"));
        assert_eq!(r.kind, Some("subscriber_panicked"));
    }
}

#[test]
fn sink_swapped_at_runtime_is_used_by_existing_channels() {
    let _lock = LOCK.lock();
    let first = CollectingSink::new();
    let second = CollectingSink::new();
    let _guard = sinks::scoped(first.clone());

    let ch: Channel<Signal> = Channel::with_config("swap", ChannelConfig::locked());
    ch.subscribe_fn(|| panic!("always"), 0);

    ch.invoke(());
    sinks::install(second.clone());
    ch.invoke(());
    sinks::uninstall();
    ch.invoke(());

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
}

struct Prefixing {
    lines: Arc<Mutex<Vec<String>>>,
}

impl FailureSink for Prefixing {
    fn error(&self, message: &str) {
        self.lines.lock().push(format!("ERR {message}"));
    }
}

#[test]
fn default_report_formats_message() {
    let _lock = LOCK.lock();
    let lines = Arc::new(Mutex::new(Vec::new()));
    let _guard = sinks::scoped(Prefixing {
        lines: Arc::clone(&lines),
    });

    let ch: Channel<Signal> = Channel::new("fmt");
    ch.subscribe(&Subscriber::named("bad", || panic!("kaput")), 0);
    ch.invoke(());

    assert_eq!(
        *lines.lock(),
        vec!["ERR [fmt] subscriber 'bad' subscriber_panicked: panic: kaput".to_string()]
    );
}

struct Panicky;

impl FailureSink for Panicky {
    fn error(&self, _message: &str) {
        unreachable!("report is overridden");
    }

    fn report(&self, failure: &Failure<'_>) {
        panic!("sink cannot handle {}", failure.channel);
    }
}

#[test]
fn panicking_sink_does_not_abort_dispatch() {
    let _lock = LOCK.lock();
    let _guard = sinks::scoped(Panicky);

    let ch: Channel<Signal> = Channel::new("fragile");
    let ran = Arc::new(Mutex::new(false));
    let r = Arc::clone(&ran);
    ch.subscribe_fn(|| panic!("first"), 1);
    ch.subscribe_fn(move || *r.lock() = true, 0);

    ch.invoke(());
    assert!(*ran.lock());
}

#[cfg(feature = "logging")]
#[test]
fn log_sink_installs() {
    let _lock = LOCK.lock();
    let _guard = sinks::scoped(sinks::LogSink::new());
    assert_eq!(sinks::active().map(|s| s.name()), Some("LogSink"));

    let ch: Channel<Signal> = Channel::new("logged");
    ch.subscribe_fn(|| panic!("logged failure"), 0);
    ch.invoke(());
}

#[test]
fn runtime_labels_reach_the_sink() {
    let _lock = LOCK.lock();
    let sink = CollectingSink::new();
    let _guard = sinks::scoped(sink.clone());

    let ch: Channel<Signal> = Channel::new("plugins");
    for name in ["weather", "chat"] {
        let label = format!("plugin:{name}");
        ch.subscribe(&Subscriber::named(label, move || panic!("{name} crashed")), 0);
    }
    ch.invoke(());

    let mut reported: Vec<_> = sink.records().into_iter().filter_map(|r| r.subscriber).collect();
    reported.sort();
    assert_eq!(reported, vec!["plugin:chat", "plugin:weather"]);
}
