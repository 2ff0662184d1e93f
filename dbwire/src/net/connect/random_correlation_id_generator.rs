use rand::{Rng, thread_rng};

use crate::net::connect::correlation_id::{CorrelationId, CorrelationIdGenerator};

pub struct RandomCorrelationIdGenerator {}

impl CorrelationIdGenerator for RandomCorrelationIdGenerator {
    fn generate(&self) -> CorrelationId {
        return thread_rng().gen_range(1..=CorrelationId::MAX);
    }
}

impl RandomCorrelationIdGenerator {
    pub fn new() -> Self {
        return RandomCorrelationIdGenerator {};
    }
}
