pub mod note_commands;
pub mod note_state;

pub use note_commands::{save_data, surface_ready};
pub use note_state::NoteState;
