pub mod index;
pub mod present;
pub mod reader;
pub mod tokenizer;

// Re-export main types for convenient access
pub use index::{CounterIndex, LineIndex, LineStore, PositionIndex, TextIndex};
pub use reader::{LineReader, ReadStats, ReaderConfig};
pub use tokenizer::Tokenizer;
