pub mod due;
pub mod filter;
pub mod quick_add;
pub mod stats;
pub mod task_ops;
