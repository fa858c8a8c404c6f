//! Moving out of a container
//!
//! A plain `let v2 = v1;` makes `v1` unusable at compile time. To keep using
//! the source binding, the move has to leave something behind, and
//! `mem::take` leaves an empty vector rather than an unspecified one.
//!
//! Run with: cargo run --bin move_semantics

use std::mem;

fn sizes() -> Vec<String> {
    let mut v1 = vec![1, 2, 3];
    let mut lines = vec![format!("v1 size: {}", v1.len())];

    let v2 = mem::take(&mut v1);

    lines.push(format!("v1 size: {}", v1.len()));
    lines.push(format!("v2 size: {}", v2.len()));
    lines
}

fn main() {
    for line in sizes() {
        println!("{}", line);
    }

    let v1 = vec![1, 2, 3];
    let v2 = v1;
    // println!("v1: {:?}", v1); // error[E0382]: borrow of moved value
    println!("v2: {:?}", v2);
}
