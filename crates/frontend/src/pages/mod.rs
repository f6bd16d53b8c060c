pub mod home;
pub mod map_page;
