pub mod answer_config;
pub mod answer_option;
pub mod draft;
pub mod question;
pub mod reference;
