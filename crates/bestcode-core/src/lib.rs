pub mod cost;
pub mod dict;
pub mod finder;
pub mod linker;
pub mod report;
pub mod settings;
