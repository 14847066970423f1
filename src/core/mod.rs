pub mod compositor;
pub mod crystallizer;
pub mod narrative;
pub mod pipeline;
