pub mod blocks;
pub mod cmdlet;
pub mod frontmatter;
pub mod sections;
