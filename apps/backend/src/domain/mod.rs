//! Pure rules for a single guessing round: no I/O, no clocks beyond the
//! timestamps handed in at open time, no locking. The session engine is
//! the only writer.

pub mod round;

#[cfg(test)]
mod tests;
#[cfg(test)]
mod tests_props;

pub use round::{Phase, Pick, PlayerEntry, Round, PICK_MAX, PICK_MIN};
