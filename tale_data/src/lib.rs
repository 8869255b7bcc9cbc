pub mod docs;
pub mod io;
pub mod save;
pub mod validate;

pub use docs::*;
pub use io::{DocumentError, load_game_document, load_save_document, write_save_document};
pub use save::*;
pub use validate::{ValidationWarning, validate_document};
