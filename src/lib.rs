// Library surface shared by the binary and the integration tests.
pub mod app;
pub mod app_dirs;
pub mod bank;
pub mod config;
pub mod logging;
pub mod question;
pub mod quiz;
pub mod runtime;
pub mod score;
pub mod session;
pub mod shuffle;
pub mod ui;
pub mod util;

pub use question::{BankError, Question, QuestionBank};
pub use quiz::{GameState, Phase, Quiz};
pub use score::{compute_results, QuizResults};
