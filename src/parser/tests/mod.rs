mod lexer;
mod value;
