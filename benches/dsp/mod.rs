//! Benchmarks for the realtime path.

mod driver;
mod generator;

pub use driver::bench_driver;
pub use generator::bench_generator;
