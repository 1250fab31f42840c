//! Configuration tests.

mod default_tests;
