pub mod extractors;

pub use extractors::RequestId;
