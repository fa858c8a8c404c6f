//! Errors as values instead of exceptions or out-parameters
//!
//! Run with: cargo run --bin safe_divide

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
enum DivisionError {
    #[error("Division by zero!")]
    DivideByZero,
}

fn divide(a: i32, b: i32) -> Result<i32, DivisionError> {
    if b == 0 {
        Err(DivisionError::DivideByZero)
    } else {
        Ok(a / b)
    }
}

fn outcome(a: i32, b: i32) -> String {
    match divide(a, b) {
        Ok(result) => format!("Result: {}", result),
        Err(e) => format!("Error: {}", e),
    }
}

fn main() {
    println!("{}", outcome(10, 0));
}
