pub mod add;
pub mod list;
pub mod quiz;
pub mod repl;
