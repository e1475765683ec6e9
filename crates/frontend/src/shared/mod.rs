pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod debounce;
pub mod http;
pub mod icons;
pub mod modal_frame;
pub mod toasts;
