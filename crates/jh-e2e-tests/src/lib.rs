//! Test-only crate: the end-to-end suites live in `tests/`.
