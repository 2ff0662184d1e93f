const DEFAULT_CAPACITY: usize = 64;

#[derive(Clone, Copy, Debug)]
pub struct RequestWaitingListConfig {
    capacity: usize,
}

impl RequestWaitingListConfig {
    pub fn new(capacity: usize) -> Self {
        return RequestWaitingListConfig { capacity };
    }

    pub fn get_capacity(&self) -> usize {
        return self.capacity;
    }
}

impl Default for RequestWaitingListConfig {
    fn default() -> Self {
        return Self::new(DEFAULT_CAPACITY);
    }
}
