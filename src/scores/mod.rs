pub mod store;

pub use store::ScoreStore;
