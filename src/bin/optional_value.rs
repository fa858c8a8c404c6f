//! Option instead of a sentinel return value
//!
//! Run with: cargo run --bin optional_value

fn get_value(valid: bool) -> Option<i32> {
    if valid { Some(10) } else { None }
}

fn describe(value: Option<i32>) -> String {
    match value {
        Some(val) => val.to_string(),
        None => "No value found".to_string(),
    }
}

fn main() {
    println!("{}", describe(get_value(false)));
}
