//! Search controller: state plus the reducer for the fetch pipeline.

mod state;
mod update;

pub use state::{DEFAULT_PAGE_SIZE, PAGE_SIZES, PhotoView, SearchParams, SearchState, total_pages};
pub use update::{
    close_photo, handle_breeds, handle_dogs, handle_search, next_page, prev_page, refresh_breeds,
    select_breed, set_page, set_page_size, set_sort_field, show_photo, start, toggle_sort,
};
