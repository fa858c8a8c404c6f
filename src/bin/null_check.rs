//! Null-like state without null pointers
//!
//! Run with: cargo run --bin null_check

/// `None` takes the place of a null pointer; the compiler forces the check.
fn describe(ptr: Option<&i32>) -> String {
    match ptr {
        Some(value) => value.to_string(),
        None => "Pointer is null".to_string(),
    }
}

fn main() {
    let ptr: Option<&i32> = None;
    println!("{}", describe(ptr));
}
