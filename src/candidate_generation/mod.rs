pub mod sorted_neighbourhood;

pub use sorted_neighbourhood::{
    generate_candidate_pairs, sorted_neighbourhood_pairs, BlockingConfig, BlockingKey,
    BlockingResult,
};
