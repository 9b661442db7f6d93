pub mod builders;

pub use builders::{PostureFileBuilder, TerraformTree, TerraformTreeBuilder};
