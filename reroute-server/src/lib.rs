//! Delay-aware rail route planner server.
//!
//! A web application that answers: "if these stations are running late,
//! which way should I go instead?"

pub mod config;
pub mod domain;
pub mod gateway;
pub mod network;
pub mod planner;
pub mod web;
