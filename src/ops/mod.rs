pub mod displacement;
pub mod filter;
