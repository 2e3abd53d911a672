mod line_assembler;
mod parse_number;
mod tokenizer;

pub use line_assembler::{Line, LineAssembler, LineError};
pub use parse_number::{integer, parse_integer};
pub use tokenizer::LineTokenizer;
