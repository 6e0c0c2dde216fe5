//! Built-in rewrite rules
//!
//! Each rule lives in its own module and is registered by name in
//! [`crate::registry::RuleRegistry::new`]. All of them are generic over
//! node and tag names; the specifics come from configuration.

pub mod add_property;
pub mod add_tag;
pub mod init_property;
pub mod remove_tags;
pub mod rename_tag;
pub mod replace_in_tag_body;

pub use add_property::AddPropertyRule;
pub use add_tag::AddTagRule;
pub use init_property::InitPropertyRule;
pub use remove_tags::RemoveTagsRule;
pub use rename_tag::RenameTagRule;
pub use replace_in_tag_body::ReplaceInTagBodyRule;
