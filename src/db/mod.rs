pub mod pool;
pub mod trades;
