pub mod check;
pub mod new_lang;
pub mod schema;
pub mod stats;
pub mod update;
