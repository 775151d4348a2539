//! The encryption core's component pipeline (spec §4): planner, payload, noise,
//! compaction, combination, and the public value-encoding wrappers.

pub mod api;
pub mod combine;
pub mod compact;
pub mod noise;
pub mod payload;
pub mod planner;

pub use api::{enc_fp, enc_fp_depth, enc_value, enc_value_depth, enc_zero_depth, sigma_density};
pub use combine::combine_ciphers;
pub use compact::{compact_edges, compact_layers, guard_budget};
pub use planner::plan_noise;
