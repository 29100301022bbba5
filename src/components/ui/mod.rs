pub mod alert;
pub mod avatar;
pub mod button;
pub mod card;
pub mod input;
pub mod label;
pub mod skeleton;
pub mod spinner;
pub mod toaster;

// Re-export component symbols so callers can `use crate::components::ui::Button` etc.
pub use alert::*;
pub use avatar::*;
pub use button::*;
pub use card::*;
pub use input::*;
pub use label::*;
pub use skeleton::*;
pub use spinner::*;
pub use toaster::*;
