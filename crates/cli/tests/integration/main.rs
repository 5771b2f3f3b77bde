//! CLI integration tests driving fake container backends.

mod common;
mod compile_tests;
mod plan_tests;
mod plugins_tests;
