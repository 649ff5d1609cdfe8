pub mod evaluate;
pub mod parse;
pub mod report;
