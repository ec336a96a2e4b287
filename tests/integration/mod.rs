//! Integration test modules.

mod background_test;
