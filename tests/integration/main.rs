mod calendar;
mod common;
mod config;
mod core;
mod persist;
