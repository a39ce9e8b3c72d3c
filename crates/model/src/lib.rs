pub mod columns;
pub mod filter;
pub mod value;
