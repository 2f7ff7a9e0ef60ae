pub mod client;

pub use client::DoubanClient;
