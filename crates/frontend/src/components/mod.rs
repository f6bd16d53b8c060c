pub mod create_dialog;
pub mod filter_panel;
pub mod map_viewer;
pub mod smoke_dialog;
pub mod smoke_list;
