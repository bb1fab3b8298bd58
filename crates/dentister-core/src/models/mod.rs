//! Domain models for the clinic records store.

mod file;
mod meeting;
mod patient;
mod payment;
mod session;
mod transfer;

pub use file::*;
pub use meeting::*;
pub use patient::*;
pub use payment::*;
pub use session::*;
pub use transfer::*;
