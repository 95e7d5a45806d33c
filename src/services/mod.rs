pub mod drag_drop_editor;
pub mod question_service;
pub mod reference_service;
pub mod validation_service;
