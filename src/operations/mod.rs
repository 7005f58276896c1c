pub mod assembly;
pub mod detection;
pub mod editing;
pub mod pipeline;
pub mod validation;
