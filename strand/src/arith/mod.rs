//! Arithmetic primitives: [`Number`], the [`Operation`] table, and [`ArithmeticRunnable`].

mod number;
mod operation;
mod runnable;

pub use number::Number;
pub use operation::Operation;
pub use runnable::ArithmeticRunnable;
