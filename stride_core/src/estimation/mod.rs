// stride_core/src/estimation/mod.rs

//! Attitude and position estimation: a complementary filter for roll/pitch/yaw
//! feeding a double integrator with zero-velocity correction.

pub mod orientation;
pub mod position;
pub mod trajectory;
