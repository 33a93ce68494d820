//! Widget-hosting shell - dashboard registry, card chrome, and the tool contract

mod card;
mod dashboard;
mod descriptor;

pub use card::{BODY_CLASS, CARD_CLASS, CLOSE_CLASS, MOVE_CLASS, TITLE_CLASS, ToolCard, card_body, card_title, close_button};
pub use dashboard::{CONTAINER_CLASS, Dashboard, ToolInstance};
pub use descriptor::{ToolDescriptor, WireFn};
