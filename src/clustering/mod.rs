pub mod groups;

pub use groups::{find_group, find_group_index};
