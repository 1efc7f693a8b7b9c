pub mod order_submitter;
pub mod plan_parser;
pub mod risk;
