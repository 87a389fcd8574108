pub mod clock;
pub mod daily_limit;
pub mod evaluator;
pub mod round;
pub mod vocabulary;

// Re-export main components
pub use clock::*;
pub use daily_limit::*;
pub use evaluator::*;
pub use round::*;
pub use vocabulary::*;
