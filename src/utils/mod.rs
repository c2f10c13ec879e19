//! Terminal utilities: progress bars and styled output.

mod progress;
mod styling;

pub use progress::{create_row_progress, create_spinner, finish_with_success};
pub use styling::{
    print_banner, print_completion, print_config, print_info, print_step_header, print_success,
};
