pub mod tokenizer;

pub use tokenizer::parse;
