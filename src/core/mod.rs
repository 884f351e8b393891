pub mod color;
pub mod geometry;
pub mod reorder;
pub mod tools_merge;
pub mod render;
pub mod i18n;
pub mod paths;
pub mod export;
