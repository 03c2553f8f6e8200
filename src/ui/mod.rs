/// User interface building blocks
///
/// - `uploader.rs` - picker and drop zone
/// - `viewer.rs` - original/restored image panes

pub mod uploader;
pub mod viewer;
