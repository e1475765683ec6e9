pub mod pagination_controls;
pub mod user_avatar;
