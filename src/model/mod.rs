mod batch;
mod product;

pub use batch::{FetchKind, ResultBatch};
pub use product::{Product, Rating};
