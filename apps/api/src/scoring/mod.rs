// Score handling for the comparison matrix: flattening a candidate's skill
// tree, the fixed row criteria, and the cell colour tiers.

pub mod criteria;
pub mod normalizer;
pub mod tiers;
