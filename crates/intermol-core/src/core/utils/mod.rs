pub mod bitset;
pub mod geometry;
pub mod identifiers;
pub mod spatial_hash;
