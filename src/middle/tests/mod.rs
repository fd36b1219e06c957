//! Middle end tests
