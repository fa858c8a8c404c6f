//! Macro arguments are expressions, not text
//!
//! A C preprocessor `#define SQUARE(x) x * x` turns `SQUARE(x + 1)` into
//! `x + 1 * x + 1`. `macro_rules!` substitutes `$x:expr` as a single
//! expression node, so no parentheses are needed.
//!
//! Run with: cargo run --bin square_macro

macro_rules! square {
    ($x:expr) => {{
        $x * $x
    }};
}

fn main() {
    let x = 5;
    println!("{}", square!(x + 1));
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_expression_argument_is_grouped() {
        let x = 5;
        assert_eq!(square!(x + 1), 36);
        assert_eq!(square!(-3), 9);
    }
}
