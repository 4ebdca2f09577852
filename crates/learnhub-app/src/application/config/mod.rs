mod timeouts;

pub use timeouts::TimeoutConfig;
