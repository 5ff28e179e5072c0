pub mod evaluate;
pub mod lexer;

use std::sync::Once;

pub use evaluate::{calculate, EvalError, Evaluate, Evaluation, Value};
pub use lexer::Operator;

static TRACING_INIT: Once = Once::new();

/// Installs a stderr subscriber when `RUST_LOG` is set, e.g. `RUST_LOG=calculate=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
