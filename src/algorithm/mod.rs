/// Rigid item clusters with lazily rebuilt edge tables
pub mod cluster;
/// Candidate item placements with save and restore
pub mod configuration;
/// Bitset of item handles
pub mod itemset;
/// Drag descriptors and solver requests
pub mod parameters;
/// Push, fallback and arbitration logic of the reorder solver
pub mod reorder;
/// Cost model for choosing between successful pushes
pub mod scoring;
/// Drag gesture lifecycle: previews, commits and reverts
pub mod session;
