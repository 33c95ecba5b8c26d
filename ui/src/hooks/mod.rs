pub mod use_paste_listener;
