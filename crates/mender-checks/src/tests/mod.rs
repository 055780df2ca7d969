//! Behaviour tests for the mender-checks crate.
