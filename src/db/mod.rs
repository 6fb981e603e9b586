pub mod sqlite;

pub use sqlite::{connect_options, row_to_record};
