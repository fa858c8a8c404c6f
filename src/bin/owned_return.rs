//! Returning a value instead of a reference to a local
//!
//! `fn create_int<'a>() -> &'a i32 { let x = 10; &x }` is rejected with
//! E0515: the local dies when the function returns. Returning the value
//! itself moves it out to the caller.
//!
//! Run with: cargo run --bin owned_return

fn create_int() -> i32 {
    let x = 10;
    x
}

fn main() {
    let value = create_int();
    println!("{}", value);
}
