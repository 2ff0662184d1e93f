use std::sync::atomic::{AtomicI32, Ordering};

use crate::net::connect::correlation_id::{CorrelationId, CorrelationIdGenerator, RESERVED_CORRELATION_ID};

/// Hands out request ids in increasing order, the way a single connection numbers its
/// outgoing messages. Ids are always positive; after `i32::MAX` the sequence restarts at 1.
pub struct SequentialCorrelationIdGenerator {
    next: AtomicI32,
}

impl CorrelationIdGenerator for SequentialCorrelationIdGenerator {
    fn generate(&self) -> CorrelationId {
        let previous = self.next.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
            return Some(Self::successor(current));
        });
        return match previous {
            Ok(correlation_id) => correlation_id,
            Err(correlation_id) => correlation_id,
        };
    }
}

impl SequentialCorrelationIdGenerator {
    pub fn new() -> Self {
        return Self::starting_at(1);
    }

    pub fn starting_at(first: CorrelationId) -> Self {
        let first = if first <= RESERVED_CORRELATION_ID { 1 } else { first };
        return SequentialCorrelationIdGenerator { next: AtomicI32::new(first) };
    }

    fn successor(current: CorrelationId) -> CorrelationId {
        if current == CorrelationId::MAX {
            return 1;
        }
        return current + 1;
    }
}

#[cfg(all(test, feature = "test_type_unit"))]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use crate::net::connect::correlation_id::{CorrelationId, CorrelationIdGenerator};
    use crate::net::connect::sequential_correlation_id_generator::SequentialCorrelationIdGenerator;

    #[test]
    fn generate_in_sequence() {
        let generator = SequentialCorrelationIdGenerator::new();
        assert_eq!(1, generator.generate());
        assert_eq!(2, generator.generate());
        assert_eq!(3, generator.generate());
    }

    #[test]
    fn wrap_around_after_max() {
        let generator = SequentialCorrelationIdGenerator::starting_at(CorrelationId::MAX);
        assert_eq!(CorrelationId::MAX, generator.generate());
        assert_eq!(1, generator.generate());
    }

    #[test]
    fn never_start_at_reserved_or_negative() {
        let generator = SequentialCorrelationIdGenerator::starting_at(-5);
        assert_eq!(1, generator.generate());
    }

    #[test]
    fn unique_across_threads() {
        let generator = Arc::new(SequentialCorrelationIdGenerator::new());
        let handles: Vec<_> = (0..4).map(|_| {
            let generator = generator.clone();
            thread::spawn(move || {
                return (0..250).map(|_| generator.generate()).collect::<Vec<_>>();
            })
        }).collect();

        let mut all = HashSet::new();
        for handle in handles {
            for correlation_id in handle.join().unwrap() {
                assert!(all.insert(correlation_id));
            }
        }
        assert_eq!(1000, all.len());
    }
}
