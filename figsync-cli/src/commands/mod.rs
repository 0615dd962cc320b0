pub mod forget;
pub mod status;
pub mod sync;
