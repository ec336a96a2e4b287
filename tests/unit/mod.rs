//! Unit test modules.

mod balance_test;
mod resample_test;
mod zones_test;
