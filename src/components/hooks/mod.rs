mod use_scroll_near_end;

pub use use_scroll_near_end::use_scroll_near_end;
