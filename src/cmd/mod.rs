pub mod output;
pub mod sync;
