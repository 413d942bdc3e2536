//! Parser module: the block-tree builder and its per-kind grammars.

pub mod block_parser;

pub use block_parser::Block;
pub use block_parser::reference_definitions::LinkReference;
pub use block_parser::tables::Alignment;
