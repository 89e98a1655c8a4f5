/// Bounded channel implementation.
pub mod bounded;
/// Rendezvous (zero-capacity) channel implementation.
pub mod rendezvous;
