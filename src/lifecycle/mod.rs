pub mod console;

pub use console::EstateConsole;
