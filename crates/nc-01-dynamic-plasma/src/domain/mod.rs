//! Pure pricing logic. No I/O, no shared state.

pub mod conversion;
pub mod dynamic_plasma;
pub mod governance;
pub mod price;
