pub mod ast;
pub mod compiler;
pub mod diag;
pub mod error;
pub mod ir;
pub mod lexer;
pub mod loader;
pub mod parser;
pub mod resolver;
pub mod scheduler;
pub mod scope;
