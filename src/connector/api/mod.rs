pub mod command;
pub mod container;
pub mod controller;
pub mod router;
pub mod shell;

pub use command::{RelayCommand, HELP_TEXT};
pub use container::{Container, ContainerConfig};
pub use router::Router;
pub use shell::run_shell;
