pub mod expression;
pub mod record;
pub mod vocabulary;
