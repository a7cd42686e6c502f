pub mod ask;
pub mod preview;
pub mod prompt;
pub mod snippets;
pub mod tree;
pub mod utils;
