pub mod compare;
pub mod geospatial;
pub mod manager;
pub mod scoring;

pub use geospatial::get_distance;
pub use manager::{run_place_matching_pipeline, PipelineOutput};
pub use scoring::{block_and_score, get_score, score_candidate_pairs, ScoredCandidates, ScoringConfig};
