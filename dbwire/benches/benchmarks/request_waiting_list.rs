use std::sync::Arc;

use bytes::Bytes;
use criterion::{BatchSize, Criterion, criterion_group};

use dbwire::net::connect::correlation_id::CorrelationId;
use dbwire::net::reply::server_reply::ServerReply;
use dbwire::net::request_waiting_list::reply_callback::{ReplyCallback, ReplyResult};
use dbwire::net::request_waiting_list::reply_error::ReplyError;
use dbwire::net::request_waiting_list::request_waiting_list::RequestWaitingList;

const SIZE: usize = 64 * 1024;

struct NothingCallback {}

impl ReplyCallback for NothingCallback {
    fn on_reply(&self, _: ReplyResult) {}
}

fn register(criterion: &mut Criterion) {
    let callback = Arc::new(NothingCallback {});
    let mut group = criterion.benchmark_group("request waiting list register");

    group.bench_function("register without capacity", |bencher| {
        bencher.iter_batched(
            || (RequestWaitingList::new_with_capacity(0), (1..=SIZE).map(|index| index as CorrelationId).collect::<Vec<_>>()),
            |(waiting_list, correlation_ids)| {
                for correlation_id in correlation_ids {
                    waiting_list.register(correlation_id, callback.clone());
                }
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("register with capacity", |bencher| {
        bencher.iter_batched(
            || (RequestWaitingList::new_with_capacity(SIZE), (1..=SIZE).map(|index| index as CorrelationId).collect::<Vec<_>>()),
            |(waiting_list, correlation_ids)| {
                for correlation_id in correlation_ids {
                    waiting_list.register(correlation_id, callback.clone());
                }
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn deliver(criterion: &mut Criterion) {
    let callback = Arc::new(NothingCallback {});
    let payload = Bytes::from_static(b"reply");

    criterion.bench_function("request waiting list deliver", |bencher| {
        bencher.iter_batched(
            || {
                let waiting_list = RequestWaitingList::new_with_capacity(SIZE);
                for index in 1..=SIZE {
                    waiting_list.register(index as CorrelationId, callback.clone());
                }
                return waiting_list;
            },
            |waiting_list| {
                for index in 1..=SIZE {
                    let correlation_id = index as CorrelationId;
                    waiting_list.deliver(ServerReply::new(0, correlation_id, 2013, payload.clone()));
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn cancel_all(criterion: &mut Criterion) {
    let callback = Arc::new(NothingCallback {});

    criterion.bench_function("request waiting list cancel all", |bencher| {
        bencher.iter_batched(
            || {
                let waiting_list = RequestWaitingList::new_with_capacity(SIZE);
                for index in 1..=SIZE {
                    waiting_list.register(index as CorrelationId, callback.clone());
                }
                return waiting_list;
            },
            |waiting_list| waiting_list.cancel_all(ReplyError::ConnectionClosed),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, register, deliver, cancel_all);
