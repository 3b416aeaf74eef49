//! Request handlers

pub mod etf;
pub mod health;
