//! Behaviour tests for the mender-scan crate.
