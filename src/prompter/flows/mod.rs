pub mod calendar_flow;
mod parse;
