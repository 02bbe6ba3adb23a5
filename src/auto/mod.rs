pub mod auto;
pub mod path;
