//! Balance simulator for Code Clicker.
//! Run with: cargo test simulate_greedy -- --nocapture
