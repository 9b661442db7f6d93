mod posture_file;
mod tree;

pub use posture_file::PostureFileBuilder;
pub use tree::{TerraformTree, TerraformTreeBuilder};
