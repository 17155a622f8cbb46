pub mod gender_partitioner;
pub mod identity_partitioner;

pub use gender_partitioner::GenderPartitioner;
pub use identity_partitioner::IdentityPartitioner;
