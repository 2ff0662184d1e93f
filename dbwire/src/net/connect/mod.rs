pub mod correlation_id;
pub mod random_correlation_id_generator;
pub mod sequential_correlation_id_generator;
pub mod error;
