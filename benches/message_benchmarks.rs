//! Message Passing Benchmarks
//!
//! Measures baseline performance of message routing and delivery:
//! - Point-to-point stream publish/receive latency
//! - Sustained stream throughput
//! - Fan-out to multiple subscribers (10 subscribers)
//! - Mailbox enqueue/dequeue operations

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]
#![allow(unused_imports)]

// Layer 1: Standard library imports
use std::hint::black_box;
use std::time::Duration;

// Layer 2: Third-party crate imports
use criterion::{criterion_group, criterion_main, Criterion};

// Layer 3: Internal module imports
use meshforge::broker::{StreamBroker, StreamId};
use meshforge::mailbox::traits::MailboxSender;
use meshforge::mailbox::BoundedMailbox;
use meshforge::message::Envelope;

fn envelope(id: u64, payload: &str) -> Envelope {
    Envelope::new(
        "bench-actor",
        format!("instance-{id}"),
        "handle",
        bytes::Bytes::copy_from_slice(payload.as_bytes()),
    )
}

/// Benchmark: Point-to-point stream publish/receive
fn message_send_receive(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("message_send_receive", |b| {
        b.to_async(&rt).iter(|| async {
            let broker = StreamBroker::new(16);
            let stream = StreamId::new("bench-stream");
            let mut subscription = broker.subscribe(&stream);

            broker.publish(&stream, envelope(1, "test"));

            let received = subscription.recv().await;

            black_box(received);
        });
    });
}

/// Benchmark: Sustained stream throughput
fn message_throughput(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("message_throughput", |b| {
        b.to_async(&rt).iter(|| async {
            let broker = StreamBroker::new(256);
            let stream = StreamId::new("bench-stream");
            let mut subscription = broker.subscribe(&stream);

            for i in 0..100 {
                broker.publish(&stream, envelope(i, &format!("message_{i}")));
            }

            let mut count = 0;
            while count < 100 {
                if subscription.recv().await.is_ok() {
                    count += 1;
                }
            }

            black_box(count);
        });
    });
}

/// Benchmark: Fan-out to 10 subscribers
fn message_broadcast_small(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("message_broadcast_small", |b| {
        b.to_async(&rt).iter(|| async {
            let broker = StreamBroker::new(16);
            let stream = StreamId::new("bench-stream");

            let mut subscriptions = Vec::with_capacity(10);
            for _ in 0..10 {
                subscriptions.push(broker.subscribe(&stream));
            }

            broker.publish(&stream, envelope(1, "broadcast"));

            for subscription in &mut subscriptions {
                let _ = subscription.recv().await;
            }

            black_box(subscriptions);
        });
    });
}

/// Benchmark: Mailbox enqueue/dequeue operations
fn mailbox_operations(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("mailbox_operations", |b| {
        b.to_async(&rt).iter(|| async {
            let (mailbox, sender) = BoundedMailbox::new(1000);

            for i in 0..100 {
                sender.send(envelope(i, &format!("msg_{i}"))).await.unwrap();
            }

            black_box((mailbox, sender));
        });
    });
}

/// Configure criterion for resource-conscious benchmarking
fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(30)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(2))
        .without_plots()
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets =
        message_send_receive,
        message_throughput,
        message_broadcast_small,
        mailbox_operations
}

criterion_main!(benches);
