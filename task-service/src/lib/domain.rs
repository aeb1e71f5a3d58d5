pub mod account;
pub mod errors;
pub mod identity;
pub mod ownership;
pub mod task;
