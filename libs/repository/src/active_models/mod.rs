pub mod prelude;

pub mod prompt_analysis;
